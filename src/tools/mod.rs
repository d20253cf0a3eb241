pub mod load_dataset;
pub mod lookup;
pub mod search;
pub mod status;

pub use load_dataset::*;
pub use lookup::*;
pub use search::*;
pub use status::*;
