use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::attendance::{
    dtos as attendance_dtos, handlers as attendance_handlers, models as attendance_models,
    services as attendance_services,
};
use crate::features::auth;
use crate::features::companies::{
    dtos as companies_dtos, handlers as companies_handlers, models as companies_models,
};
use crate::features::damage_reports::{
    dtos as damage_dtos, handlers as damage_handlers, models as damage_models,
};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::inventory::{
    dtos as inventory_dtos, handlers as inventory_handlers, models as inventory_models,
};
use crate::features::materials::{
    dtos as materials_dtos, handlers as materials_handlers, models as materials_models,
};
use crate::features::tasks::{dtos as tasks_dtos, handlers as tasks_handlers, models as tasks_models};
use crate::features::tickets::{
    dtos as tickets_dtos, handlers as tickets_handlers, models as tickets_models,
};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::login,
        auth::handlers::get_me,
        // Accounts
        users_handlers::list_clients,
        users_handlers::create_client,
        users_handlers::delete_client,
        users_handlers::reset_client_password,
        users_handlers::change_staff_password,
        // Lots
        companies_handlers::list_companies,
        companies_handlers::create_company,
        companies_handlers::set_company_password,
        // Tasks
        tasks_handlers::get_rotation,
        tasks_handlers::list_tasks,
        tasks_handlers::update_task,
        tasks_handlers::validate_day,
        tasks_handlers::list_history,
        // Damage reports
        damage_handlers::get_draft,
        damage_handlers::save_draft,
        damage_handlers::submit_report,
        damage_handlers::list_drafts,
        damage_handlers::move_draft,
        damage_handlers::delete_report,
        damage_handlers::list_history,
        // Attendance
        attendance_handlers::check_in,
        attendance_handlers::check_out,
        attendance_handlers::list_attendance,
        attendance_handlers::export_attendance,
        // Tickets
        tickets_handlers::create_ticket,
        tickets_handlers::list_my_tickets,
        tickets_handlers::archive_ticket,
        tickets_handlers::list_messages,
        tickets_handlers::client_ticket_stream,
        tickets_handlers::list_active_tickets,
        tickets_handlers::comment_ticket,
        tickets_handlers::complete_ticket,
        tickets_handlers::manager_ticket_stream,
        tickets_handlers::list_all_tickets,
        tickets_handlers::set_ticket_status,
        tickets_handlers::update_ticket_reason,
        tickets_handlers::delete_ticket,
        tickets_handlers::export_tickets,
        // Materials
        materials_handlers::create_request,
        materials_handlers::list_recent,
        materials_handlers::list_all,
        materials_handlers::set_fulfilled,
        materials_handlers::delete_request,
        // Inventory
        inventory_handlers::add_item,
        inventory_handlers::list_items,
        inventory_handlers::update_item,
        inventory_handlers::delete_item,
        inventory_handlers::export_items,
        // Dashboard
        dashboard_handlers::get_overview,
        dashboard_handlers::get_company_detail,
    ),
    components(
        schemas(
            Meta,
            ApiResponse<()>,
            // Auth
            auth::dtos::LoginRequestDto,
            auth::dtos::AuthResponseDto,
            auth::dtos::MeResponseDto,
            auth::model::AuthenticatedUser,
            // Accounts
            users_dtos::CreateClientDto,
            users_dtos::ResetPasswordDto,
            users_dtos::ChangePasswordDto,
            users_dtos::StaffAccount,
            users_dtos::ClientAccountDto,
            // Lots
            companies_dtos::CreateCompanyDto,
            companies_dtos::SetCompanyPasswordDto,
            companies_dtos::CompanyDto,
            companies_models::Company,
            // Tasks
            tasks_dtos::UpdateTaskDto,
            tasks_dtos::DayValidationSummary,
            tasks_dtos::RotationDto,
            tasks_models::TaskInstance,
            tasks_models::TaskHistory,
            // Damage reports
            damage_dtos::DamageFormDto,
            damage_dtos::MoveDraftDto,
            damage_dtos::DraftResponseDto,
            damage_models::DamageStatus,
            damage_models::DamageReport,
            damage_models::DamageHistory,
            // Attendance
            attendance_dtos::AttendanceDto,
            attendance_models::AttendanceRecord,
            attendance_models::AttendanceEntry,
            attendance_models::CheckInOutcome,
            attendance_models::CheckOutOutcome,
            attendance_services::DailyAttendance,
            // Tickets
            tickets_dtos::CreateTicketFormDto,
            tickets_dtos::CommentTicketDto,
            tickets_dtos::SetTicketStatusDto,
            tickets_dtos::UpdateReasonDto,
            tickets_models::TicketStatus,
            tickets_models::Ticket,
            tickets_models::TicketMessage,
            // Materials
            materials_dtos::CreateMaterialRequestDto,
            materials_dtos::SetFulfilledDto,
            materials_models::MaterialRequest,
            // Inventory
            inventory_dtos::CreateInventoryItemDto,
            inventory_dtos::UpdateInventoryItemDto,
            inventory_models::InventoryItem,
            // Dashboard
            dashboard_dtos::OverviewMode,
            dashboard_dtos::CompanyOverview,
            dashboard_dtos::OverviewDto,
            dashboard_dtos::TaskRow,
            dashboard_dtos::DamageRow,
            dashboard_dtos::CompanyDetailDto,
        )
    ),
    tags(
        (name = "auth", description = "Login and current principal"),
        (name = "accounts", description = "Client and staff accounts (admin only)"),
        (name = "companies", description = "Lots and their shared employee password"),
        (name = "tasks", description = "Rotating daily tasks and day validation"),
        (name = "damage-reports", description = "Daily damage drafts, submissions and history"),
        (name = "attendance", description = "Employee check-in and check-out"),
        (name = "tickets", description = "Client tickets, manager follow-up and live boards"),
        (name = "materials", description = "Material requests from managers"),
        (name = "inventory", description = "Warehouse inventory"),
        (name = "dashboard", description = "Admin overview across lots"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Chantier API",
        version = "0.1.0",
        description = "API documentation for Chantier",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
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
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
