/// Length of generated user identifiers.
pub const USER_ID_LENGTH: usize = 12;
