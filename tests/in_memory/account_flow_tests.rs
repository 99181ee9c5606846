//! Registration, login, and session token tests.

use super::helpers::{PASSWORD, Workspace, workspace};
use rstest::rstest;
use tasklane::identity::domain::SystemRole;
use tasklane::identity::services::RegisterRequest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_user_authenticates_with_issued_token(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let (user, ctx) = workspace.sign_up("Ada").await?;

    eyre::ensure!(ctx.user_id() == user.id(), "context should carry the user");
    eyre::ensure!(
        ctx.actor().role() == SystemRole::Member,
        "new accounts should be members"
    );
    Ok(())
}

#[rstest]
#[case::wrong_password("ada@tasklane.test", "not the password")]
#[case::unknown_email("nobody@tasklane.test", PASSWORD)]
#[case::malformed_email("not-an-email", PASSWORD)]
#[tokio::test(flavor = "multi_thread")]
async fn failed_logins_share_one_message(
    workspace: Workspace,
    #[case] email: &str,
    #[case] password: &str,
) {
    workspace.sign_up("Ada").await.expect("sign up");

    let err = workspace
        .accounts
        .login(email, password)
        .await
        .expect_err("login should fail");

    assert_eq!(err.code(), "UNAUTHENTICATED");
    assert_eq!(err.to_string(), "authentication failed: invalid email or password");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_is_a_conflict(workspace: Workspace) {
    workspace.sign_up("Ada").await.expect("sign up");

    let err = workspace
        .accounts
        .register(RegisterRequest::new("Other Ada", "ADA@tasklane.test", PASSWORD))
        .await
        .expect_err("duplicate email");

    assert_eq!(err.code(), "CONFLICT");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn garbage_token_is_rejected(workspace: Workspace) {
    let err = workspace
        .accounts
        .authenticate("not.a.token")
        .await
        .expect_err("invalid token");

    assert_eq!(err.code(), "UNAUTHENTICATED");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn external_identity_sign_in_is_idempotent(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let (first, _) = workspace
        .accounts
        .sign_in_with_external_identity("github", "1234", "grace@tasklane.test", "Grace")
        .await?;
    let (second, token) = workspace
        .accounts
        .sign_in_with_external_identity("github", "1234", "grace@tasklane.test", "Grace")
        .await?;

    eyre::ensure!(first.id() == second.id(), "same account on repeat sign-in");
    let ctx = workspace.accounts.authenticate(&token.value).await?;
    eyre::ensure!(ctx.user_id() == first.id(), "token resolves to the account");

    let err = workspace
        .accounts
        .login("grace@tasklane.test", PASSWORD)
        .await
        .expect_err("federated accounts have no password");
    eyre::ensure!(err.code() == "UNAUTHENTICATED", "unexpected error {err}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn profile_update_changes_display_name(workspace: Workspace) -> Result<(), eyre::Report> {
    let (_, ctx) = workspace.sign_up("Ada").await?;

    let updated = workspace
        .accounts
        .update_profile(&ctx, Some("Ada Lovelace".to_owned()), None)
        .await?;

    eyre::ensure!(updated.name() == "Ada Lovelace", "name should change");
    Ok(())
}
