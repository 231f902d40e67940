use desk_core::{AuthError, Desk, DeskConfig, Portal, RouteDecision, PortalArea, Route};
use desk_model::{CharityId, CharityUpdate, JobRole, Permission, Role, Theme};
use desk_test_utils::{login_as_admin, seeded_desk};
use proptest::prelude::*;

#[test]
fn test_seeded_accounts() {
    let mut desk = seeded_desk();

    let admin = desk.login("admin", "123", Portal::Admin).unwrap().clone();
    assert_eq!(admin.name, "General Manager");
    assert_eq!(admin.role, Role::Admin);

    let manager = desk.login("etaam", "123", Portal::Charity).unwrap().clone();
    assert_eq!(manager.id, "c2");
    assert_eq!(manager.job_role, Some(JobRole::Manager));
    assert!(manager.permissions.is_full());

    let employee = desk.login("emp1", "123", Portal::Charity).unwrap().clone();
    assert_eq!(employee.role, Role::Employee);
    assert!(employee.has_permission(Permission::ManageTasks));
    assert!(!employee.has_permission(Permission::ManageTeam));
}

#[test]
fn test_portals_do_not_cross() {
    let mut desk = seeded_desk();
    assert_eq!(
        desk.login("admin", "123", Portal::Charity).unwrap_err(),
        AuthError::InvalidCredentials
    );
    assert!(desk.login("ber", "123", Portal::Admin).is_err());
    assert!(desk.current_user().is_none());
}

#[test]
fn test_configured_admin_account() {
    let mut desk = Desk::new(DeskConfig::new().with_admin("director", "s3cret"));
    assert!(desk.login("admin", "123", Portal::Admin).is_err());
    assert!(desk.login("director", "s3cret", Portal::Admin).is_ok());
}

#[test]
fn test_updated_credentials_take_effect() {
    let mut desk = login_as_admin();
    let update = CharityUpdate::credentials("birr", "new-pass");
    desk.update_charity(&CharityId::new("c1"), &update).unwrap();
    desk.logout();

    assert!(desk.login("ber", "123", Portal::Charity).is_err());
    let user = desk.login("birr", "new-pass", Portal::Charity).unwrap();
    assert_eq!(user.name, "Manager of Al-Birr Charity");
}

#[test]
fn test_logout_keeps_preferences_and_guards_routes() {
    let mut desk = login_as_admin();
    assert_eq!(desk.toggle_theme(), Theme::Dark);
    assert_eq!(desk.route(PortalArea::Admin), RouteDecision::Allow);
    assert_eq!(
        desk.route(PortalArea::Charity),
        RouteDecision::Redirect(Route::AdminHome)
    );

    desk.logout();
    assert_eq!(desk.session().theme(), Theme::Dark);
    assert_eq!(
        desk.route(PortalArea::Admin),
        RouteDecision::Redirect(Route::Landing)
    );
}

proptest! {
    #[test]
    fn prop_wrong_password_never_changes_user(password in "[a-z0-9]{0,12}") {
        prop_assume!(password != "123");
        let mut desk = seeded_desk();
        desk.login("emp1", "123", Portal::Charity).unwrap();

        for (username, portal) in [("admin", Portal::Admin), ("ber", Portal::Charity), ("emp1", Portal::Charity)] {
            prop_assert!(desk.login(username, &password, portal).is_err());
            prop_assert_eq!(desk.current_user().map(|u| u.id.as_str()), Some("u1"));
        }
    }
}
