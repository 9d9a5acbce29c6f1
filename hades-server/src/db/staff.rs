//! Staff database operations
//!
//! The four mutation paths (create, update, set status, deactivate) each run
//! as one transaction: lock the branch row, lock the branch's active
//! Administrator rows, consult [`admin_guard::clear`], then write. The
//! count-check and the write can therefore never interleave with a
//! concurrent mutation of the same branch's administrators.

use shared::error::{AppError, ErrorCode};
use shared::models::{
    ADMINISTRATOR_ROLE_ID, DEFAULT_ROLE_ID, Employee, EmployeeCreate, EmployeeUpdate,
};
use shared::util::{now_millis, snowflake_id, today};
use sqlx::{PgConnection, PgPool};

use super::admin_guard::{self, Clearance, StaffMutation, TargetState};
use super::RequestContext;
use crate::error::{ServiceError, ServiceResult};
use crate::util::hash_password;

const EMPLOYEE_COLUMNS: &str = "id, branch_id, username, full_name, national_id, role_id, \
     email, phone, birth_date, salary, hire_date, is_active, is_owner, last_access, created_at";

/// Employee row with credentials, for the login path only
#[derive(sqlx::FromRow)]
pub struct StaffCredential {
    pub id: i64,
    pub branch_id: i64,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
}

pub async fn list_staff(pool: &PgPool, branch_id: i64) -> ServiceResult<Vec<Employee>> {
    let rows: Vec<Employee> = sqlx::query_as(&format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE branch_id = $1 ORDER BY full_name ASC"
    ))
    .bind(branch_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get_employee(pool: &PgPool, branch_id: i64, id: i64) -> ServiceResult<Employee> {
    let row: Option<Employee> = sqlx::query_as(&format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1 AND branch_id = $2"
    ))
    .bind(id)
    .bind(branch_id)
    .fetch_optional(pool)
    .await?;
    row.ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound).into())
}

/// Look up an active employee of an active branch for login
pub async fn find_credential_by_username(
    pool: &PgPool,
    username: &str,
) -> ServiceResult<Option<StaffCredential>> {
    let row = sqlx::query_as(
        "SELECT e.id, e.branch_id, e.username, e.password_hash, e.full_name
         FROM employees e
         JOIN branches b ON b.id = e.branch_id
         WHERE e.username = $1 AND e.is_active = TRUE AND b.is_active = TRUE",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn touch_last_access(pool: &PgPool, id: i64) -> ServiceResult<()> {
    sqlx::query("UPDATE employees SET last_access = $1 WHERE id = $2")
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Create a new staff member. If the role is Administrator, every other
/// active administrator of the branch is deactivated in the same
/// transaction before the insert.
///
/// Returns the new employee's id and generated username.
pub async fn create_employee(
    pool: &PgPool,
    ctx: &RequestContext,
    data: &EmployeeCreate,
    default_password: &str,
) -> ServiceResult<(i64, String)> {
    let full_name = validate_create(data)?;
    let role_id = data.role_id.unwrap_or(DEFAULT_ROLE_ID);

    let password_hash = hash_password(default_password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let mut tx = pool.begin().await?;

    lock_branch(&mut tx, ctx.branch_id).await?;
    require_role(&mut tx, role_id).await?;

    let username = derive_username(full_name);
    let taken: Option<(i64,)> = sqlx::query_as("SELECT id FROM employees WHERE username = $1")
        .bind(&username)
        .fetch_optional(&mut *tx)
        .await?;
    if taken.is_some() {
        return Err(AppError::new(ErrorCode::EmployeeUsernameExists).into());
    }

    let admins = lock_active_admins(&mut tx, ctx.branch_id, None).await?;
    let clearance = admin_guard::clear(
        StaffMutation::Create { role_id },
        None,
        admins.len() as u64,
    )?;
    if clearance == Clearance::DisplaceOtherAdmins {
        displace(&mut tx, &admins).await?;
    }

    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO employees (
            id, branch_id, username, password_hash, full_name, national_id,
            role_id, email, phone, birth_date, salary, hire_date,
            is_active, is_owner, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, TRUE, FALSE, $13)",
    )
    .bind(id)
    .bind(ctx.branch_id)
    .bind(&username)
    .bind(&password_hash)
    .bind(full_name)
    .bind(&data.national_id)
    .bind(role_id)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(data.birth_date)
    .bind(data.salary.unwrap_or_default())
    .bind(data.hire_date.unwrap_or_else(today))
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok((id, username))
}

/// Update a staff member's fields. Promotion into the Administrator role
/// displaces the branch's other active administrators and activates the
/// target; demoting the sole active administrator is refused.
pub async fn update_employee(
    pool: &PgPool,
    ctx: &RequestContext,
    id: i64,
    data: &EmployeeUpdate,
) -> ServiceResult<()> {
    validate_update(data)?;

    let mut tx = pool.begin().await?;

    lock_branch(&mut tx, ctx.branch_id).await?;
    require_role(&mut tx, data.role_id).await?;

    let target = lock_target(&mut tx, ctx.branch_id, id).await?;
    let admins = lock_active_admins(&mut tx, ctx.branch_id, Some(id)).await?;
    let clearance = admin_guard::clear(
        StaffMutation::Update {
            new_role_id: data.role_id,
        },
        Some(&target),
        admins.len() as u64,
    )?;
    let becomes_active = clearance == Clearance::DisplaceOtherAdmins;
    if becomes_active {
        displace(&mut tx, &admins).await?;
    }

    let result = sqlx::query(
        "UPDATE employees SET
            full_name = $1,
            national_id = $2,
            role_id = $3,
            email = COALESCE($4, email),
            phone = COALESCE($5, phone),
            birth_date = COALESCE($6, birth_date),
            salary = COALESCE($7, salary),
            hire_date = COALESCE($8, hire_date),
            is_active = CASE WHEN $9 THEN TRUE ELSE is_active END
        WHERE id = $10 AND branch_id = $11",
    )
    .bind(data.full_name.trim())
    .bind(data.national_id.trim())
    .bind(data.role_id)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(data.birth_date)
    .bind(data.salary)
    .bind(data.hire_date)
    .bind(becomes_active)
    .bind(id)
    .bind(ctx.branch_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::new(ErrorCode::EmployeeNotFound).into());
    }

    tx.commit().await?;
    Ok(())
}

/// Set an employee's active flag. Activating an administrator displaces
/// the branch's other active administrators; deactivating the last active
/// administrator is refused.
pub async fn set_active_status(
    pool: &PgPool,
    ctx: &RequestContext,
    id: i64,
    active: bool,
) -> ServiceResult<()> {
    let mut tx = pool.begin().await?;

    lock_branch(&mut tx, ctx.branch_id).await?;

    let target = lock_target(&mut tx, ctx.branch_id, id).await?;
    let admins = lock_active_admins(&mut tx, ctx.branch_id, Some(id)).await?;
    let clearance = admin_guard::clear(
        StaffMutation::SetActive { active },
        Some(&target),
        admins.len() as u64,
    )?;
    if clearance == Clearance::DisplaceOtherAdmins {
        displace(&mut tx, &admins).await?;
    }

    sqlx::query("UPDATE employees SET is_active = $1 WHERE id = $2 AND branch_id = $3")
        .bind(active)
        .bind(id)
        .bind(ctx.branch_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Soft-delete an employee (employees are never hard-deleted). Owners are
/// protected; the last active administrator is protected.
///
/// Returns the deactivated employee's full name for the confirmation
/// message.
pub async fn deactivate_employee(
    pool: &PgPool,
    ctx: &RequestContext,
    id: i64,
) -> ServiceResult<String> {
    let mut tx = pool.begin().await?;

    lock_branch(&mut tx, ctx.branch_id).await?;

    let row: Option<(i64, bool, bool, String)> = sqlx::query_as(
        "SELECT role_id, is_active, is_owner, full_name
         FROM employees WHERE id = $1 AND branch_id = $2 FOR UPDATE",
    )
    .bind(id)
    .bind(ctx.branch_id)
    .fetch_optional(&mut *tx)
    .await?;
    let (role_id, is_active, is_owner, full_name) =
        row.ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;

    if is_owner {
        return Err(AppError::new(ErrorCode::EmployeeIsProtected).into());
    }

    let target = TargetState { role_id, is_active };
    let admins = lock_active_admins(&mut tx, ctx.branch_id, Some(id)).await?;
    admin_guard::clear(StaffMutation::Deactivate, Some(&target), admins.len() as u64)?;

    sqlx::query("UPDATE employees SET is_active = FALSE WHERE id = $1 AND branch_id = $2")
        .bind(id)
        .bind(ctx.branch_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(full_name)
}

/// Point-in-time self-heal, run at startup: a branch with no active
/// administrator gets its most recent administrator reactivated, or a
/// default one synthesized when none exist at all.
///
/// Returns the id of the administrator that was restored or created, or
/// `None` when the branch was already healthy.
pub async fn ensure_active_admin(
    pool: &PgPool,
    branch_id: i64,
    default_admin_name: &str,
    default_password: &str,
) -> ServiceResult<Option<i64>> {
    let mut tx = pool.begin().await?;

    lock_branch(&mut tx, branch_id).await?;

    let admins = lock_active_admins(&mut tx, branch_id, None).await?;
    if !admins.is_empty() {
        tx.commit().await?;
        return Ok(None);
    }

    // Prefer reactivating the most recent administrator on file
    let dormant: Option<(i64,)> = sqlx::query_as(
        "SELECT id FROM employees
         WHERE branch_id = $1 AND role_id = $2
         ORDER BY created_at DESC LIMIT 1
         FOR UPDATE",
    )
    .bind(branch_id)
    .bind(ADMINISTRATOR_ROLE_ID)
    .fetch_optional(&mut *tx)
    .await?;

    if let Some((id,)) = dormant {
        sqlx::query("UPDATE employees SET is_active = TRUE WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        return Ok(Some(id));
    }

    // No administrator on file at all: synthesize the default one
    let password_hash = hash_password(default_password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
    let base = derive_username(default_admin_name);
    let taken: Option<(i64,)> = sqlx::query_as("SELECT id FROM employees WHERE username = $1")
        .bind(&base)
        .fetch_optional(&mut *tx)
        .await?;
    let username = if taken.is_some() {
        format!("{base}.{branch_id}")
    } else {
        base
    };

    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO employees (
            id, branch_id, username, password_hash, full_name,
            role_id, salary, hire_date, is_active, is_owner, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, 0, $7, TRUE, FALSE, $8)",
    )
    .bind(id)
    .bind(branch_id)
    .bind(&username)
    .bind(&password_hash)
    .bind(default_admin_name)
    .bind(ADMINISTRATOR_ROLE_ID)
    .bind(today())
    .bind(now_millis())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Some(id))
}

// ── Transaction helpers ──

/// Serialize all administrator-affecting writes per branch on the branch
/// row lock, and reject mutations against unknown or disabled branches.
async fn lock_branch(tx: &mut PgConnection, branch_id: i64) -> ServiceResult<()> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM branches WHERE id = $1 AND is_active = TRUE FOR UPDATE")
            .bind(branch_id)
            .fetch_optional(&mut *tx)
            .await?;
    row.map(|_| ())
        .ok_or_else(|| AppError::new(ErrorCode::BranchNotFound).into())
}

async fn require_role(tx: &mut PgConnection, role_id: i64) -> ServiceResult<()> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM roles WHERE id = $1")
        .bind(role_id)
        .fetch_optional(&mut *tx)
        .await?;
    row.map(|_| ())
        .ok_or_else(|| AppError::new(ErrorCode::RoleNotFound).into())
}

/// Lock and return the ids of the branch's active administrators,
/// optionally excluding the mutation target.
async fn lock_active_admins(
    tx: &mut PgConnection,
    branch_id: i64,
    exclude: Option<i64>,
) -> ServiceResult<Vec<i64>> {
    let rows: Vec<(i64,)> = sqlx::query_as(
        "SELECT id FROM employees
         WHERE branch_id = $1 AND role_id = $2 AND is_active = TRUE AND id <> $3
         FOR UPDATE",
    )
    .bind(branch_id)
    .bind(ADMINISTRATOR_ROLE_ID)
    .bind(exclude.unwrap_or(0))
    .fetch_all(&mut *tx)
    .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

async fn displace(tx: &mut PgConnection, admin_ids: &[i64]) -> ServiceResult<()> {
    if admin_ids.is_empty() {
        return Ok(());
    }
    sqlx::query("UPDATE employees SET is_active = FALSE WHERE id = ANY($1)")
        .bind(admin_ids)
        .execute(&mut *tx)
        .await?;
    Ok(())
}

/// Fetch and lock the mutation target's pre-state
async fn lock_target(
    tx: &mut PgConnection,
    branch_id: i64,
    id: i64,
) -> ServiceResult<TargetState> {
    let row: Option<(i64, bool)> = sqlx::query_as(
        "SELECT role_id, is_active FROM employees
         WHERE id = $1 AND branch_id = $2 FOR UPDATE",
    )
    .bind(id)
    .bind(branch_id)
    .fetch_optional(&mut *tx)
    .await?;
    row.map(|(role_id, is_active)| TargetState { role_id, is_active })
        .ok_or_else(|| ServiceError::App(AppError::new(ErrorCode::EmployeeNotFound)))
}

/// Required-field checks run before any transaction is opened; a rejected
/// payload never reaches the store.
fn validate_create(data: &EmployeeCreate) -> Result<&str, AppError> {
    let full_name = data.full_name.trim();
    if full_name.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "Full name is required",
        ));
    }
    Ok(full_name)
}

fn validate_update(data: &EmployeeUpdate) -> Result<(), AppError> {
    if data.full_name.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "Full name is required",
        ));
    }
    if data.national_id.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "National ID is required",
        ));
    }
    Ok(())
}

/// Derive a login username from a full name, the way the legacy desktop
/// app did: lowercase, accents stripped, word breaks become dots.
fn derive_username(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(".")
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            c => c,
        })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '.')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn create_payload(full_name: &str) -> EmployeeCreate {
        EmployeeCreate {
            full_name: full_name.to_string(),
            national_id: None,
            role_id: None,
            email: None,
            phone: None,
            birth_date: None,
            salary: None,
            hire_date: None,
        }
    }

    #[test]
    fn test_create_requires_full_name() {
        let err = validate_create(&create_payload("   ")).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);

        assert_eq!(validate_create(&create_payload("  Ana  ")).unwrap(), "Ana");
    }

    #[test]
    fn test_update_requires_name_and_national_id() {
        let mut data = EmployeeUpdate {
            full_name: "Carlos Pérez".to_string(),
            national_id: "001-1234567-8".to_string(),
            role_id: 2,
            email: None,
            phone: None,
            birth_date: None,
            salary: Some(Decimal::ZERO),
            hire_date: None,
        };
        assert!(validate_update(&data).is_ok());

        data.national_id = " ".to_string();
        let err = validate_update(&data).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);

        data.national_id = "001-1234567-8".to_string();
        data.full_name = String::new();
        let err = validate_update(&data).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
    }

    #[test]
    fn test_derive_username_basic() {
        assert_eq!(derive_username("Carlos Pérez"), "carlos.perez");
        assert_eq!(
            derive_username("María José Núñez"),
            "maria.jose.nunez"
        );
    }

    #[test]
    fn test_derive_username_strips_symbols_and_collapses_spaces() {
        assert_eq!(derive_username("  Ana   O'Brien  "), "ana.obrien");
        assert_eq!(derive_username("Jean-Luc 2nd"), "jeanluc.2nd");
    }
}
