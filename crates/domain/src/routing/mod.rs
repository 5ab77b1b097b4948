mod matcher;
mod route;
mod table;

pub use route::DomainRoute;
pub use table::DomainTable;
