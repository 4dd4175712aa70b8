//! Shared types used across list and mutation endpoints.

mod pagination;
mod response;

pub use pagination::{
    CategoryPage, ClientPage, EmployeePage, OrderPage, Paginated, PaginationParams, ProductPage,
    SortDirection, SupplierPage, UserPage,
};
pub use response::{Created, LinkedPage, NoContent};
