use lyceum_derive::lyceum_error;

#[lyceum_error]
pub enum RosterError {
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
}

fn main() {}
