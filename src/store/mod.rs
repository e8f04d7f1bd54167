//! Entity store: the read-only data collaborator of the risk engine.

pub mod memory;
pub mod pagination;
pub mod query;
pub mod traits;

pub use memory::{InMemoryStore, Snapshot};
pub use pagination::{
    calculate_pagination, PageMeta, Paginated, Pagination, PaginationOptions, SortField,
};
pub use query::{
    EmployeeFilter, EmployeeQuery, SortOrder, SystemFilter, SystemQuery, TaskFilter, TaskInclude,
    TaskOrder, TaskQuery, TeamFilter, TeamQuery,
};
pub use traits::{EntityStore, StoreResult};
