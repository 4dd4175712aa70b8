//! Employee handlers. Reads need any signed-in user, writes need an admin.

use axum::{
    extract::{Extension, OriginalUri, Path, Query, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{CreateEmployee, Employee, EmployeeFilter, UpdateEmployee};
use crate::errors::AppResult;
use crate::types::{Created, EmployeePage, LinkedPage, NoContent, PaginationParams};

pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/:id",
            get(get_employee)
                .put(update_employee)
                .patch(update_employee)
                .delete(delete_employee),
        )
}

#[utoipa::path(
    get,
    path = "/api/employee",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(PaginationParams, EmployeeFilter),
    responses(
        (status = 200, description = "Page of employees", body = EmployeePage),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_employees(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<EmployeeFilter>,
) -> AppResult<LinkedPage<Employee>> {
    let page = state.employee_service.list(filter, params).await?;
    Ok(LinkedPage::new(page, uri))
}

#[utoipa::path(
    get,
    path = "/api/employee/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee", body = Employee),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Employee>> {
    Ok(Json(state.employee_service.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/employee",
    tag = "Employees",
    security(("bearer_auth" = [])),
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn create_employee(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateEmployee>,
) -> AppResult<Created<Employee>> {
    require_admin(&current_user)?;
    Ok(Created(state.employee_service.create(payload).await?))
}

/// Also mounted as PATCH
#[utoipa::path(
    put,
    path = "/api/employee/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn update_employee(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateEmployee>,
) -> AppResult<Json<Employee>> {
    require_admin(&current_user)?;
    Ok(Json(state.employee_service.update(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/employee/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn delete_employee(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;
    state.employee_service.delete(id).await?;
    Ok(NoContent)
}
