//! Access control
//!
//! Two layers:
//! - Navigation: which sidebar entries and routes a user gets to see
//! - Mutation boundary: whether a desk operation may run at all
//!
//! Navigation filtering alone is presentational. [`authorize`] is the
//! check the desk applies before it touches the store.

use crate::error::AccessError;
use desk_model::{CharityId, Permission, Role, User};

/// Admin portal sidebar entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminNav {
    /// Charity list and details
    Charities,
    /// Issue tasks to charities
    TaskAssignment,
    /// Internal mail
    Mail,
    /// Cross-charity statistics
    Stats,
    /// Display preferences
    Settings,
}

impl AdminNav {
    /// Every entry in sidebar order
    pub const ALL: [AdminNav; 5] = [
        AdminNav::Charities,
        AdminNav::TaskAssignment,
        AdminNav::Mail,
        AdminNav::Stats,
        AdminNav::Settings,
    ];

    /// Route path
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            AdminNav::Charities => "/admin",
            AdminNav::TaskAssignment => "/admin/tasks",
            AdminNav::Mail => "/admin/mail",
            AdminNav::Stats => "/admin/stats",
            AdminNav::Settings => "/admin/settings",
        }
    }

    /// Sidebar label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            AdminNav::Charities => "Charities",
            AdminNav::TaskAssignment => "Task Assignment",
            AdminNav::Mail => "Mail",
            AdminNav::Stats => "Statistics",
            AdminNav::Settings => "Settings",
        }
    }
}

/// Charity portal sidebar entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharityNav {
    /// Kanban board
    TaskBoard,
    /// Project list
    Projects,
    /// Team members
    Team,
    /// Internal mail
    Mail,
}

impl CharityNav {
    /// Every entry in sidebar order
    pub const ALL: [CharityNav; 4] = [
        CharityNav::TaskBoard,
        CharityNav::Projects,
        CharityNav::Team,
        CharityNav::Mail,
    ];

    /// Route path
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            CharityNav::TaskBoard => "/charity",
            CharityNav::Projects => "/charity/projects",
            CharityNav::Team => "/charity/team",
            CharityNav::Mail => "/charity/mail",
        }
    }

    /// Sidebar label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            CharityNav::TaskBoard => "Task Board",
            CharityNav::Projects => "Projects",
            CharityNav::Team => "Team",
            CharityNav::Mail => "Mail",
        }
    }

    /// Permission an employee needs to see the entry, if any
    #[must_use]
    pub const fn required_permission(&self) -> Option<Permission> {
        match self {
            CharityNav::Projects => Some(Permission::ManageProjects),
            CharityNav::Team => Some(Permission::ManageTeam),
            CharityNav::TaskBoard | CharityNav::Mail => None,
        }
    }
}

/// Charity portal entries visible to `user`
///
/// Managers see everything. Employees always see the board and mail, and
/// see the other entries only with the matching permission.
#[must_use]
pub fn charity_sidebar(user: &User) -> Vec<CharityNav> {
    CharityNav::ALL
        .into_iter()
        .filter(|entry| {
            user.role == Role::CharityManager
                || entry
                    .required_permission()
                    .map_or(true, |p| user.permissions.contains(p))
        })
        .collect()
}

/// Admin portal entries (all of them)
#[must_use]
pub fn admin_sidebar() -> Vec<AdminNav> {
    AdminNav::ALL.to_vec()
}

/// Route group being entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalArea {
    /// `/admin/*`
    Admin,
    /// `/charity/*`
    Charity,
}

/// Public routes a guard can redirect to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Landing,
    /// `/admin`
    AdminHome,
    /// `/charity`
    CharityHome,
}

impl Route {
    /// Route path
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::AdminHome => "/admin",
            Route::CharityHome => "/charity",
        }
    }
}

/// Outcome of a route guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the requested view
    Allow,
    /// Send the visitor elsewhere
    Redirect(Route),
}

/// Gate a portal area on the visitor's role
#[must_use]
pub fn guard_route(area: PortalArea, user: Option<&User>) -> RouteDecision {
    let Some(user) = user else {
        return RouteDecision::Redirect(Route::Landing);
    };
    match (area, user.role) {
        (PortalArea::Admin, Role::Admin) => RouteDecision::Allow,
        (PortalArea::Admin, _) => RouteDecision::Redirect(Route::CharityHome),
        (PortalArea::Charity, Role::CharityManager | Role::Employee) => RouteDecision::Allow,
        (PortalArea::Charity, Role::Admin) => RouteDecision::Redirect(Route::AdminHome),
    }
}

/// A mutation a user may attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Register a charity
    AddCharity,
    /// Change a charity's record or credentials
    UpdateCharity,
    /// Create a task for a charity
    CreateTask(CharityId),
    /// Change a task (status moves included)
    UpdateTask(CharityId),
    /// Comment on a task
    Comment(CharityId),
    /// Create a project for a charity
    AddProject(CharityId),
    /// Add a team member to a charity
    AddTeamMember(CharityId),
    /// Send internal mail
    SendMail,
}

impl Action {
    /// Short name used in errors and logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Action::AddCharity => "add charity",
            Action::UpdateCharity => "update charity",
            Action::CreateTask(_) => "create task",
            Action::UpdateTask(_) => "update task",
            Action::Comment(_) => "comment",
            Action::AddProject(_) => "add project",
            Action::AddTeamMember(_) => "add team member",
            Action::SendMail => "send mail",
        }
    }

    fn charity(&self) -> Option<&CharityId> {
        match self {
            Action::CreateTask(c)
            | Action::UpdateTask(c)
            | Action::Comment(c)
            | Action::AddProject(c)
            | Action::AddTeamMember(c) => Some(c),
            Action::AddCharity | Action::UpdateCharity | Action::SendMail => None,
        }
    }

    fn required_permission(&self) -> Option<Permission> {
        match self {
            Action::CreateTask(_) => Some(Permission::ManageTasks),
            Action::AddProject(_) => Some(Permission::ManageProjects),
            Action::AddTeamMember(_) => Some(Permission::ManageTeam),
            _ => None,
        }
    }
}

/// Check whether `user` may perform `action`
///
/// Rules:
/// - Charity administration is admin-only
/// - Admin may create and update tasks and comment for any charity, but
///   projects and team members belong to the charity's own staff
/// - Charity users act only inside their own charity, and need the
///   matching permission for tasks, projects and team (managers hold all)
///
/// # Errors
/// Returns the `AccessError` describing the first failed rule
pub fn authorize(user: Option<&User>, action: &Action) -> Result<(), AccessError> {
    let user = user.ok_or(AccessError::NotAuthenticated)?;
    let name = action.name();

    if matches!(action, Action::AddCharity | Action::UpdateCharity) {
        return if user.is_admin() {
            Ok(())
        } else {
            Err(AccessError::AdminOnly { action: name })
        };
    }

    let Some(charity) = action.charity() else {
        return Ok(());
    };

    if user.is_admin() {
        return match action {
            Action::CreateTask(_) | Action::UpdateTask(_) | Action::Comment(_) => Ok(()),
            _ => Err(AccessError::ForeignCharity {
                action: name,
                charity: charity.clone(),
            }),
        };
    }

    if user.charity_id.as_ref() != Some(charity) {
        return Err(AccessError::ForeignCharity {
            action: name,
            charity: charity.clone(),
        });
    }

    match action.required_permission() {
        Some(permission) if !user.has_permission(permission) => {
            Err(AccessError::MissingPermission {
                action: name,
                permission,
            })
        }
        _ => Ok(()),
    }
}
