//! Unit tests for `authorize` and the denial codes it yields.

use crate::access::{
    AccessDenied, Actor, Capability, DenialCode, Resource, authorize, authorize_project_creation,
};
use crate::identity::domain::{SystemRole, UserId};
use crate::project::domain::{MemberRole, NewProject, Project};
use crate::task::domain::{NewTask, Task};
use chrono::{Duration, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

struct Scene {
    owner: UserId,
    admin: UserId,
    member: UserId,
    viewer: UserId,
    assignee: UserId,
    outsider: UserId,
    project: Project,
    task: Task,
}

#[fixture]
fn scene() -> Scene {
    let clock = DefaultClock;
    let owner = UserId::new();
    let admin = UserId::new();
    let member = UserId::new();
    let viewer = UserId::new();
    let assignee = UserId::new();
    let outsider = UserId::new();

    let mut project = Project::new(
        NewProject::new("Apollo", "Moon programme", owner).expect("valid project"),
        &clock,
    )
    .expect("project should build");
    project
        .add_member(admin, MemberRole::Administrator, &clock)
        .expect("add admin");
    project
        .add_member(member, MemberRole::Member, &clock)
        .expect("add member");
    project
        .add_member(viewer, MemberRole::Viewer, &clock)
        .expect("add viewer");
    project
        .add_member(assignee, MemberRole::Member, &clock)
        .expect("add assignee");

    let task = Task::new(
        NewTask::new(
            project.id(),
            "Launch",
            "Light the candle",
            [assignee],
            owner,
            Utc::now() + Duration::days(3),
        )
        .expect("valid task"),
        &clock,
    );

    Scene {
        owner,
        admin,
        member,
        viewer,
        assignee,
        outsider,
        project,
        task,
    }
}

fn actor(user: UserId) -> Actor {
    Actor::new(user, SystemRole::Member)
}

fn denial(result: Result<(), AccessDenied>) -> Option<DenialCode> {
    result.err().map(|denied| denied.code())
}

#[rstest]
fn non_member_cannot_view_project(scene: Scene) {
    let result = authorize(
        &actor(scene.outsider),
        Resource::Project(&scene.project),
        Capability::ViewProject,
    );

    let denied = result.expect_err("outsider should be denied");
    assert_eq!(denied.code(), DenialCode::NotMember);
    assert_eq!(denied.reason(), "not authorized: not a project member");
}

#[rstest]
fn system_administrator_bypasses_membership(scene: Scene) {
    let admin = Actor::new(scene.outsider, SystemRole::Administrator);
    for capability in [
        Capability::ViewProject,
        Capability::UpdateProject,
        Capability::DeleteProject,
        Capability::UpdateTask,
    ] {
        let resource = Resource::Task {
            project: &scene.project,
            task: &scene.task,
        };
        assert!(authorize(&admin, resource, capability).is_ok(), "{capability}");
    }
}

#[rstest]
#[case::viewer_reads(MemberRole::Viewer, Capability::ViewProject, None)]
#[case::viewer_cannot_create(MemberRole::Viewer, Capability::CreateTask, Some(DenialCode::Role))]
#[case::member_creates(MemberRole::Member, Capability::CreateTask, None)]
#[case::member_reorders(MemberRole::Member, Capability::ReorderTasks, None)]
#[case::member_cannot_update_project(
    MemberRole::Member,
    Capability::UpdateProject,
    Some(DenialCode::Role)
)]
#[case::admin_updates_project(MemberRole::Administrator, Capability::UpdateProject, None)]
#[case::admin_deletes_project(MemberRole::Administrator, Capability::DeleteProject, None)]
fn project_roles_gate_capabilities(
    scene: Scene,
    #[case] role: MemberRole,
    #[case] capability: Capability,
    #[case] expected: Option<DenialCode>,
) {
    let user = match role {
        MemberRole::Administrator => scene.admin,
        MemberRole::Member => scene.member,
        MemberRole::Viewer => scene.viewer,
    };

    let result = authorize(&actor(user), Resource::Project(&scene.project), capability);

    assert_eq!(denial(result), expected);
}

#[rstest]
fn owner_counts_as_project_administrator(scene: Scene) {
    let result = authorize(
        &actor(scene.owner),
        Resource::Project(&scene.project),
        Capability::UpdateProject,
    );
    assert!(result.is_ok());
}

#[rstest]
#[case(Capability::ReadTask)]
#[case(Capability::UpdateTask)]
#[case(Capability::DeleteTask)]
#[case(Capability::CommentOnTask)]
fn task_access_requires_assignment(scene: Scene, #[case] capability: Capability) {
    let task = Resource::Task {
        project: &scene.project,
        task: &scene.task,
    };

    assert!(authorize(&actor(scene.assignee), task, capability).is_ok());
    assert!(authorize(&actor(scene.admin), task, capability).is_ok());
    assert_eq!(
        denial(authorize(&actor(scene.member), task, capability)),
        Some(DenialCode::NotAssignee)
    );
    assert_eq!(
        denial(authorize(&actor(scene.outsider), task, capability)),
        Some(DenialCode::NotMember)
    );
}

#[rstest]
#[case(SystemRole::Member)]
#[case(SystemRole::Administrator)]
fn removing_the_owner_is_always_denied(scene: Scene, #[case] system_role: SystemRole) {
    let caller = Actor::new(scene.admin, system_role);
    let result = authorize(
        &caller,
        Resource::Membership {
            project: &scene.project,
            member: scene.owner,
        },
        Capability::RemoveMember,
    );

    assert_eq!(denial(result), Some(DenialCode::OwnerProtected));
}

#[rstest]
fn member_management_requires_administrator(scene: Scene) {
    let membership = Resource::Membership {
        project: &scene.project,
        member: scene.viewer,
    };

    assert!(authorize(&actor(scene.admin), membership, Capability::RemoveMember).is_ok());
    assert_eq!(
        denial(authorize(&actor(scene.member), membership, Capability::ChangeMemberRole)),
        Some(DenialCode::Role)
    );
}

#[rstest]
#[case(SystemRole::Administrator, true)]
#[case(SystemRole::Member, true)]
#[case(SystemRole::Viewer, false)]
fn system_viewers_cannot_create_projects(#[case] role: SystemRole, #[case] allowed: bool) {
    let result = authorize_project_creation(&Actor::new(UserId::new(), role));
    assert_eq!(result.is_ok(), allowed);
}

#[rstest]
fn denial_codes_are_stable() {
    assert_eq!(DenialCode::NotMember.as_str(), "FORBIDDEN_NOT_MEMBER");
    assert_eq!(DenialCode::Role.as_str(), "FORBIDDEN_ROLE");
    assert_eq!(DenialCode::NotAssignee.as_str(), "FORBIDDEN_NOT_ASSIGNEE");
    assert_eq!(DenialCode::OwnerProtected.as_str(), "FORBIDDEN_OWNER_PROTECTED");
}
