use serde::{Deserialize, Serialize};

/// Sort direction for `orderBy` clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}
