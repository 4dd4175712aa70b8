//! OpenAPI documentation served through Swagger UI.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, category_handler, client_handler, employee_handler, order_handler,
    product_handler, storage_handler, supplier_handler, user_handler,
};
use crate::domain::{
    Category, CategoryRef, CategoryRequest, Client, CreateClient, CreateEmployee, CreateOrder,
    CreateProduct, CreateSupplier, Employee, Order, OrderId, OrderLine, OrderLineRequest,
    Product, Supplier, UpdateClient, UpdateEmployee, UpdateOrder, UpdateProduct, UpdateSupplier,
    UpdateUser, UserResponse, UserRole,
};
use crate::services::TokenResponse;
use crate::types::{
    CategoryPage, ClientPage, EmployeePage, OrderPage, ProductPage, SortDirection, SupplierPage,
    UserPage,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tienda API",
        version = "0.1.0",
        description = "Store back office: catalog, clients, orders, suppliers and staff",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::signup,
        auth_handler::signin,
        user_handler::get_current_user,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
        user_handler::restore_user,
        category_handler::list_categories,
        category_handler::get_category,
        category_handler::create_category,
        category_handler::update_category,
        category_handler::delete_category,
        product_handler::list_products,
        product_handler::get_product,
        product_handler::create_product,
        product_handler::update_product,
        product_handler::update_product_image,
        product_handler::delete_product,
        client_handler::list_clients,
        client_handler::get_client,
        client_handler::create_client,
        client_handler::update_client,
        client_handler::update_client_image,
        client_handler::delete_client,
        order_handler::list_orders,
        order_handler::list_orders_by_user,
        order_handler::get_order,
        order_handler::create_order,
        order_handler::update_order,
        order_handler::delete_order,
        supplier_handler::list_suppliers,
        supplier_handler::get_supplier,
        supplier_handler::create_supplier,
        supplier_handler::update_supplier,
        supplier_handler::delete_supplier,
        employee_handler::list_employees,
        employee_handler::get_employee,
        employee_handler::create_employee,
        employee_handler::update_employee,
        employee_handler::delete_employee,
        storage_handler::serve_file,
        storage_handler::upload_file,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            UpdateUser,
            UserPage,
            auth_handler::SignUpRequest,
            auth_handler::SignInRequest,
            TokenResponse,
            Category,
            CategoryRequest,
            CategoryPage,
            CategoryRef,
            Product,
            CreateProduct,
            UpdateProduct,
            ProductPage,
            Client,
            CreateClient,
            UpdateClient,
            ClientPage,
            OrderId,
            OrderLine,
            Order,
            OrderLineRequest,
            CreateOrder,
            UpdateOrder,
            OrderPage,
            Supplier,
            CreateSupplier,
            UpdateSupplier,
            SupplierPage,
            Employee,
            CreateEmployee,
            UpdateEmployee,
            EmployeePage,
            SortDirection,
            storage_handler::UploadResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Sign-up and sign-in"),
        (name = "Users", description = "API account management"),
        (name = "Categories", description = "Catalog categories"),
        (name = "Products", description = "Catalog products"),
        (name = "Clients", description = "Store customers"),
        (name = "Orders", description = "Orders and stock reservation"),
        (name = "Suppliers", description = "Product suppliers"),
        (name = "Employees", description = "Store staff"),
        (name = "Storage", description = "Uploaded files")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/signin"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_order_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/orders"));
        assert!(doc.paths.paths.contains_key("/api/orders/{id}"));
        assert!(doc.paths.paths.contains_key("/storage/{filename}"));
    }

    #[test]
    fn test_document_lists_staff_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/suppliers"));
        assert!(doc.paths.paths.contains_key("/api/suppliers/{id}"));
        assert!(doc.paths.paths.contains_key("/api/employee"));
        assert!(doc.paths.paths.contains_key("/api/employee/{id}"));
    }
}
