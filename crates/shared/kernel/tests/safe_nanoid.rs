use lyceum_kernel::domain::constants::USER_ID_LENGTH;
use lyceum_kernel::{SAFE_ALPHABET, safe_nanoid};
use std::collections::HashSet;

#[test]
fn default_length_is_the_user_id_length() {
    let id = safe_nanoid!();

    assert_eq!(id.chars().count(), USER_ID_LENGTH);
    assert!(id.chars().all(|ch| SAFE_ALPHABET.contains(&ch)), "ambiguous character in {id}");
}

#[test]
fn explicit_length_overrides_the_default() {
    let len = USER_ID_LENGTH / 2;
    assert_eq!(safe_nanoid!(len).chars().count(), len);
    assert_eq!(safe_nanoid!(USER_ID_LENGTH + 4).len(), USER_ID_LENGTH + 4);
}

#[test]
fn ambiguous_characters_never_appear() {
    let ids: HashSet<String> = (0..200).map(|_| safe_nanoid!()).collect();

    assert_eq!(ids.len(), 200, "user ids collided");
    for id in &ids {
        assert!(!id.contains(['0', '1', 'I', 'O', 'l']), "ambiguous character in {id}");
    }
}
