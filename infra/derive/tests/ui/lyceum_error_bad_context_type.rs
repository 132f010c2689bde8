use lyceum_derive::lyceum_error;

#[lyceum_error]
pub enum RosterError {
    #[error("Internal error: {message}")]
    Internal { message: String, context: Option<String> },
}

fn main() {}
