use lyceum_derive::lyceum_error;

#[lyceum_error]
pub struct RosterError {
    message: String,
}

fn main() {}
