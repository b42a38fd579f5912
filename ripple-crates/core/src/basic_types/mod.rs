mod committable_int;
mod engine_error;
mod invariant_id;
mod local_id;
mod timestamp;
mod var_id;

pub use committable_int::*;
pub use engine_error::*;
pub use invariant_id::*;
pub use local_id::*;
pub use timestamp::*;
pub use var_id::*;
