use cumle_protocol::Role;

/// The visible text of a word dropped into a role box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordChip {
    pub text: String,
}

/// Which box a chip sits in, and when it was put there.
/// `seq` keeps the on-screen order stable when other chips are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub role: Role,
    pub seq: u64,
}
