use lyceum_derive::lyceum_error;

#[lyceum_error]
pub enum RosterError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
}

fn main() {}
