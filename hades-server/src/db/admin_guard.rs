//! Single-active-administrator guard
//!
//! Every staff mutation path (create, update, toggle status, deactivate)
//! runs its pre-state through [`clear`] before writing. The rule it
//! protects, per branch: at most one active employee holds the
//! Administrator role at any observable point, and the last active
//! administrator can never be deactivated or demoted away.
//!
//! The guard is pure — callers collect the pre-state inside the same
//! transaction that applies the write (row locks held), so the decision
//! cannot be invalidated between check and write.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::ADMINISTRATOR_ROLE_ID;

/// Pre-state of the employee a mutation targets
#[derive(Debug, Clone, Copy)]
pub struct TargetState {
    pub role_id: i64,
    pub is_active: bool,
}

impl TargetState {
    pub fn is_admin(&self) -> bool {
        self.role_id == ADMINISTRATOR_ROLE_ID
    }
}

/// The four staff mutation paths
#[derive(Debug, Clone, Copy)]
pub enum StaffMutation {
    /// Insert a new employee with this role, active
    Create { role_id: i64 },
    /// Rewrite the target's fields, possibly moving it into or out of
    /// the Administrator role
    Update { new_role_id: i64 },
    /// Set the target's active flag
    SetActive { active: bool },
    /// Soft delete: set the target inactive
    Deactivate,
}

/// What the mutation is allowed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clearance {
    /// Apply the write as-is; no administrator bookkeeping needed
    Proceed,
    /// The target becomes the branch's single active administrator:
    /// deactivate every other active administrator in the same
    /// transaction, then apply the write with the target active
    DisplaceOtherAdmins,
}

/// Decide whether a staff mutation may proceed.
///
/// `target` is `None` only for `Create`. `other_active_admins` counts the
/// branch's active Administrator-role employees excluding the target.
///
/// Returns [`ErrorCode::LastActiveAdmin`] when the mutation would leave
/// the branch with administrators on file but none of them active.
pub fn clear(
    mutation: StaffMutation,
    target: Option<&TargetState>,
    other_active_admins: u64,
) -> AppResult<Clearance> {
    match mutation {
        StaffMutation::Create { role_id } => {
            if role_id == ADMINISTRATOR_ROLE_ID {
                Ok(Clearance::DisplaceOtherAdmins)
            } else {
                Ok(Clearance::Proceed)
            }
        }

        StaffMutation::Update { new_role_id } => {
            let target = target.ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;
            if new_role_id == ADMINISTRATOR_ROLE_ID {
                return Ok(Clearance::DisplaceOtherAdmins);
            }
            // Demotion out of the Administrator role gets the same guard
            // as deactivation: the sole active administrator stays put.
            if target.is_admin() && target.is_active && other_active_admins == 0 {
                return Err(AppError::new(ErrorCode::LastActiveAdmin));
            }
            Ok(Clearance::Proceed)
        }

        StaffMutation::SetActive { active: true } => {
            let target = target.ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;
            if target.is_admin() {
                Ok(Clearance::DisplaceOtherAdmins)
            } else {
                Ok(Clearance::Proceed)
            }
        }

        StaffMutation::SetActive { active: false } | StaffMutation::Deactivate => {
            let target = target.ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;
            if target.is_admin() && target.is_active && other_active_admins == 0 {
                return Err(AppError::new(ErrorCode::LastActiveAdmin));
            }
            Ok(Clearance::Proceed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::DEFAULT_ROLE_ID;

    const ADMIN: i64 = ADMINISTRATOR_ROLE_ID;
    const VENDOR: i64 = DEFAULT_ROLE_ID;

    fn admin(active: bool) -> TargetState {
        TargetState {
            role_id: ADMIN,
            is_active: active,
        }
    }

    fn vendor(active: bool) -> TargetState {
        TargetState {
            role_id: VENDOR,
            is_active: active,
        }
    }

    // ── Decision table ──

    #[test]
    fn create_as_admin_displaces() {
        let c = clear(StaffMutation::Create { role_id: ADMIN }, None, 1).unwrap();
        assert_eq!(c, Clearance::DisplaceOtherAdmins);
    }

    #[test]
    fn create_non_admin_proceeds() {
        let c = clear(StaffMutation::Create { role_id: VENDOR }, None, 1).unwrap();
        assert_eq!(c, Clearance::Proceed);
    }

    #[test]
    fn promotion_displaces_even_from_inactive() {
        let c = clear(
            StaffMutation::Update { new_role_id: ADMIN },
            Some(&vendor(false)),
            1,
        )
        .unwrap();
        assert_eq!(c, Clearance::DisplaceOtherAdmins);
    }

    #[test]
    fn reinforcing_admin_role_displaces_others() {
        let c = clear(
            StaffMutation::Update { new_role_id: ADMIN },
            Some(&admin(true)),
            0,
        )
        .unwrap();
        assert_eq!(c, Clearance::DisplaceOtherAdmins);
    }

    #[test]
    fn demoting_sole_active_admin_rejected() {
        let err = clear(
            StaffMutation::Update { new_role_id: VENDOR },
            Some(&admin(true)),
            0,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::LastActiveAdmin);
    }

    #[test]
    fn demoting_admin_with_backup_proceeds() {
        let c = clear(
            StaffMutation::Update { new_role_id: VENDOR },
            Some(&admin(true)),
            1,
        )
        .unwrap();
        assert_eq!(c, Clearance::Proceed);
    }

    #[test]
    fn demoting_inactive_admin_proceeds() {
        let c = clear(
            StaffMutation::Update { new_role_id: VENDOR },
            Some(&admin(false)),
            0,
        )
        .unwrap();
        assert_eq!(c, Clearance::Proceed);
    }

    #[test]
    fn deactivating_last_active_admin_rejected() {
        for m in [
            StaffMutation::SetActive { active: false },
            StaffMutation::Deactivate,
        ] {
            let err = clear(m, Some(&admin(true)), 0).unwrap_err();
            assert_eq!(err.code, ErrorCode::LastActiveAdmin);
        }
    }

    #[test]
    fn deactivating_admin_with_backup_proceeds() {
        let c = clear(StaffMutation::Deactivate, Some(&admin(true)), 1).unwrap();
        assert_eq!(c, Clearance::Proceed);
    }

    #[test]
    fn deactivating_already_inactive_admin_proceeds() {
        let c = clear(
            StaffMutation::SetActive { active: false },
            Some(&admin(false)),
            0,
        )
        .unwrap();
        assert_eq!(c, Clearance::Proceed);
    }

    #[test]
    fn activating_admin_displaces_others() {
        let c = clear(
            StaffMutation::SetActive { active: true },
            Some(&admin(false)),
            1,
        )
        .unwrap();
        assert_eq!(c, Clearance::DisplaceOtherAdmins);
    }

    #[test]
    fn non_admin_mutations_unconstrained() {
        for m in [
            StaffMutation::SetActive { active: true },
            StaffMutation::SetActive { active: false },
            StaffMutation::Deactivate,
            StaffMutation::Update {
                new_role_id: VENDOR,
            },
        ] {
            let c = clear(m, Some(&vendor(true)), 0).unwrap();
            assert_eq!(c, Clearance::Proceed);
        }
    }

    #[test]
    fn update_without_target_is_not_found() {
        let err = clear(StaffMutation::Update { new_role_id: ADMIN }, None, 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmployeeNotFound);
    }

    // ── Model-based sequence tests ──
    //
    // An in-memory employee table applies mutations exactly the way the
    // transactional staff operations do (guard decision, displacement,
    // then write), and the branch invariant is asserted after every
    // accepted mutation.

    mod model {
        use super::*;

        #[derive(Debug, Clone)]
        struct Row {
            id: i64,
            branch_id: i64,
            role_id: i64,
            is_active: bool,
        }

        #[derive(Default)]
        struct Table {
            rows: Vec<Row>,
            next_id: i64,
        }

        impl Table {
            fn other_active_admins(&self, branch_id: i64, exclude: Option<i64>) -> u64 {
                self.rows
                    .iter()
                    .filter(|r| {
                        r.branch_id == branch_id
                            && r.role_id == ADMIN
                            && r.is_active
                            && Some(r.id) != exclude
                    })
                    .count() as u64
            }

            fn displace(&mut self, branch_id: i64, exclude: Option<i64>) {
                for r in &mut self.rows {
                    if r.branch_id == branch_id
                        && r.role_id == ADMIN
                        && r.is_active
                        && Some(r.id) != exclude
                    {
                        r.is_active = false;
                    }
                }
            }

            fn create(&mut self, branch_id: i64, role_id: i64) -> AppResult<i64> {
                let n = self.other_active_admins(branch_id, None);
                let clearance = clear(StaffMutation::Create { role_id }, None, n)?;
                if clearance == Clearance::DisplaceOtherAdmins {
                    self.displace(branch_id, None);
                }
                self.next_id += 1;
                let id = self.next_id;
                self.rows.push(Row {
                    id,
                    branch_id,
                    role_id,
                    is_active: true,
                });
                Ok(id)
            }

            fn target(&self, id: i64) -> Option<(TargetState, i64)> {
                self.rows.iter().find(|r| r.id == id).map(|r| {
                    (
                        TargetState {
                            role_id: r.role_id,
                            is_active: r.is_active,
                        },
                        r.branch_id,
                    )
                })
            }

            fn update_role(&mut self, id: i64, new_role_id: i64) -> AppResult<()> {
                let (state, branch_id) = self
                    .target(id)
                    .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;
                let n = self.other_active_admins(branch_id, Some(id));
                let clearance =
                    clear(StaffMutation::Update { new_role_id }, Some(&state), n)?;
                let becomes_active = clearance == Clearance::DisplaceOtherAdmins;
                if becomes_active {
                    self.displace(branch_id, Some(id));
                }
                let row = self.rows.iter_mut().find(|r| r.id == id).unwrap();
                row.role_id = new_role_id;
                if becomes_active {
                    row.is_active = true;
                }
                Ok(())
            }

            fn set_active(&mut self, id: i64, active: bool) -> AppResult<()> {
                let (state, branch_id) = self
                    .target(id)
                    .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;
                let n = self.other_active_admins(branch_id, Some(id));
                let clearance = clear(StaffMutation::SetActive { active }, Some(&state), n)?;
                if clearance == Clearance::DisplaceOtherAdmins {
                    self.displace(branch_id, Some(id));
                }
                self.rows.iter_mut().find(|r| r.id == id).unwrap().is_active = active;
                Ok(())
            }

            fn deactivate(&mut self, id: i64) -> AppResult<()> {
                let (state, branch_id) = self
                    .target(id)
                    .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;
                let n = self.other_active_admins(branch_id, Some(id));
                clear(StaffMutation::Deactivate, Some(&state), n)?;
                self.rows.iter_mut().find(|r| r.id == id).unwrap().is_active = false;
                Ok(())
            }

            /// The branch rule: active admins never exceed one, and a branch
            /// with administrators on file always has exactly one active.
            fn assert_invariant(&self) {
                let mut branches: Vec<i64> = self.rows.iter().map(|r| r.branch_id).collect();
                branches.sort_unstable();
                branches.dedup();
                for b in branches {
                    let admins = self
                        .rows
                        .iter()
                        .filter(|r| r.branch_id == b && r.role_id == ADMIN)
                        .count();
                    let active = self
                        .rows
                        .iter()
                        .filter(|r| r.branch_id == b && r.role_id == ADMIN && r.is_active)
                        .count();
                    assert!(active <= 1, "branch {b}: {active} active administrators");
                    if admins > 0 {
                        assert_eq!(
                            active, 1,
                            "branch {b}: administrators on file but none active"
                        );
                    }
                }
            }
        }

        #[test]
        fn create_as_admin_displaces_previous_holder() {
            let mut t = Table::default();
            let a = t.create(1, ADMIN).unwrap();
            t.assert_invariant();

            let c = t.create(1, ADMIN).unwrap();
            t.assert_invariant();

            assert!(!t.rows.iter().find(|r| r.id == a).unwrap().is_active);
            assert!(t.rows.iter().find(|r| r.id == c).unwrap().is_active);
        }

        #[test]
        fn last_admin_cannot_be_deactivated_by_either_path() {
            let mut t = Table::default();
            let a = t.create(1, ADMIN).unwrap();

            let err = t.set_active(a, false).unwrap_err();
            assert_eq!(err.code, ErrorCode::LastActiveAdmin);
            let err = t.deactivate(a).unwrap_err();
            assert_eq!(err.code, ErrorCode::LastActiveAdmin);

            // target untouched, count unchanged
            assert!(t.rows.iter().find(|r| r.id == a).unwrap().is_active);
            t.assert_invariant();
        }

        #[test]
        fn promotion_makes_target_the_sole_active_admin() {
            let mut t = Table::default();
            let a = t.create(1, ADMIN).unwrap();
            let b = t.create(1, VENDOR).unwrap();
            t.set_active(b, false).unwrap();

            t.update_role(b, ADMIN).unwrap();
            t.assert_invariant();

            assert!(!t.rows.iter().find(|r| r.id == a).unwrap().is_active);
            let b_row = t.rows.iter().find(|r| r.id == b).unwrap();
            assert!(b_row.is_active);
            assert_eq!(b_row.role_id, ADMIN);
        }

        #[test]
        fn non_admin_mutations_never_constrained() {
            let mut t = Table::default();
            t.create(1, ADMIN).unwrap();
            let v = t.create(1, VENDOR).unwrap();

            t.set_active(v, false).unwrap();
            t.set_active(v, true).unwrap();
            t.deactivate(v).unwrap();
            t.assert_invariant();
        }

        #[test]
        fn branches_keep_independent_administrators() {
            let mut t = Table::default();
            let a1 = t.create(1, ADMIN).unwrap();
            let a2 = t.create(2, ADMIN).unwrap();
            t.assert_invariant();

            // both branches hold their own active administrator
            assert!(t.rows.iter().find(|r| r.id == a1).unwrap().is_active);
            assert!(t.rows.iter().find(|r| r.id == a2).unwrap().is_active);

            // displacing in branch 1 leaves branch 2 alone
            t.create(1, ADMIN).unwrap();
            t.assert_invariant();
            assert!(t.rows.iter().find(|r| r.id == a2).unwrap().is_active);
        }

        #[test]
        fn invariant_holds_across_mixed_sequences() {
            let mut t = Table::default();
            let a = t.create(1, ADMIN).unwrap();
            let b = t.create(1, VENDOR).unwrap();
            let c = t.create(1, VENDOR).unwrap();
            t.assert_invariant();

            let steps: Vec<Box<dyn Fn(&mut Table) -> AppResult<()>>> = vec![
                Box::new(move |t| t.set_active(b, false)),
                Box::new(move |t| t.update_role(c, ADMIN)),
                Box::new(move |t| t.deactivate(a)),
                Box::new(move |t| t.set_active(a, true)),
                Box::new(move |t| t.update_role(c, VENDOR)),
                Box::new(move |t| t.create(1, ADMIN).map(|_| ())),
                Box::new(move |t| t.set_active(b, true)),
                Box::new(move |t| t.deactivate(c)),
                Box::new(move |t| t.update_role(b, ADMIN)),
            ];

            for step in steps {
                // Rejected mutations must leave state untouched; accepted
                // ones must preserve the invariant.
                let _ = step(&mut t);
                t.assert_invariant();
            }
        }
    }
}
