//! Response bodies for the aggregate and delete endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SumBody {
    pub sum: f64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DeletedBody {
    pub deleted: bool,
}
