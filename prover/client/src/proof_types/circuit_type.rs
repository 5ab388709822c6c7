use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CircuitType {
    Init,
    InsertGreatest,
    InsertWithin,
    ValidNullifier,
}

impl CircuitType {
    /// Domain separation tag of the circuit, bound into every seal.
    pub fn tag(&self) -> u8 {
        match self {
            CircuitType::Init => 0,
            CircuitType::InsertGreatest => 1,
            CircuitType::InsertWithin => 2,
            CircuitType::ValidNullifier => 3,
        }
    }

    /// Whether attestations of this circuit extend the chain of roots.
    pub fn is_chained(&self) -> bool {
        !matches!(self, CircuitType::ValidNullifier)
    }
}

impl fmt::Display for CircuitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CircuitType::Init => "init",
                CircuitType::InsertGreatest => "insert-greatest",
                CircuitType::InsertWithin => "insert-within",
                CircuitType::ValidNullifier => "valid-nullifier",
            }
        )
    }
}
