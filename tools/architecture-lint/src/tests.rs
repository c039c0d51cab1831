//! Unit tests for the architecture lint.

use rstest::rstest;

use super::*;

fn lint_one(file: &str, contents: &str) -> Result<(), ArchitectureLintError> {
    lint_sources(&[LintSource::new(file, contents)])
}

#[rstest]
#[case::domain_uses_ports(
    "domain/login_flow.rs",
    "use crate::domain::ports::SessionStore; fn f() {}"
)]
#[case::domain_uses_tracing("domain/login_flow.rs", "use tracing::info_span; fn f() {}")]
#[case::presentation_uses_serde(
    "presentation/about.rs",
    "use serde::Serialize; #[derive(Serialize)] struct Style;"
)]
#[case::inbound_uses_presentation(
    "inbound/cli.rs",
    "use crate::presentation::about_section_style; fn f() {}"
)]
#[case::inbound_uses_clap("inbound/cli.rs", "use clap::Parser; fn f() {}")]
#[case::outbound_uses_reqwest(
    "outbound/directory/rest_directory.rs",
    "use reqwest::Client; fn f() -> Option<Client> { None }"
)]
#[case::outbound_uses_cap_std(
    "outbound/session/file_store.rs",
    "use cap_std::fs::Dir; fn f(_: Dir) {}"
)]
fn accepts_allowed_dependencies(#[case] file: &str, #[case] contents: &str) {
    let result = lint_one(file, contents);
    assert!(result.is_ok(), "result: {result:?}");
}

#[rstest]
#[case::domain_to_outbound(
    "domain/login_flow.rs",
    "use crate::outbound::session::FileSessionStore; fn f() {}",
    "domain must not depend on crate::outbound"
)]
#[case::domain_to_presentation_via_super(
    "domain/role_toggle.rs",
    "fn f() { let _ = super::super::presentation::MOBILE_BREAKPOINT_PX; }",
    "domain must not depend on crate::presentation"
)]
#[case::domain_to_reqwest(
    "domain/ports/account_directory.rs",
    "fn f(_: reqwest::Client) {}",
    "domain must not depend on external crate `reqwest`"
)]
#[case::domain_to_cap_std(
    "domain/session.rs",
    "use cap_std::fs::Dir; fn f(_: Dir) {}",
    "domain must not depend on external crate `cap_std`"
)]
#[case::presentation_to_inbound(
    "presentation/about.rs",
    "use crate::inbound::cli::LayoutArgs; fn f() {}",
    "presentation must not depend on crate::inbound"
)]
#[case::inbound_to_outbound_by_crate_name(
    "inbound/cli.rs",
    "use frontend::outbound::directory::RestAccountDirectory; fn f() {}",
    "inbound must not depend on crate::outbound"
)]
#[case::inbound_to_app(
    "inbound/cli.rs",
    "fn f() { let _ = crate::app::build_login_flow; }",
    "inbound must not depend on crate::app"
)]
#[case::inbound_to_reqwest(
    "inbound/cli.rs",
    "use reqwest::Client; fn f() {}",
    "inbound must not depend on external crate `reqwest`"
)]
#[case::outbound_to_inbound(
    "outbound/navigation.rs",
    "use crate::inbound::cli::CliError; fn f() {}",
    "outbound must not depend on crate::inbound"
)]
#[case::outbound_to_clap(
    "outbound/admin.rs",
    "use clap::Parser; fn f() {}",
    "outbound must not depend on external crate `clap`"
)]
fn reports_boundary_violations(#[case] file: &str, #[case] contents: &str, #[case] message: &str) {
    let Err(ArchitectureLintError::Violations(violations)) = lint_one(file, contents) else {
        panic!("expected a violation for {file}");
    };
    assert_eq!(
        violations,
        vec![Violation {
            file: PathBuf::from(file),
            message: message.to_owned(),
        }]
    );
}

#[rstest]
fn repeated_offences_in_one_file_collapse_to_one_violation() {
    let contents = "use crate::outbound::admin; use crate::outbound::navigation; fn f() {}";
    let Err(ArchitectureLintError::Violations(violations)) =
        lint_one("domain/login_flow.rs", contents)
    else {
        panic!("expected violations");
    };
    assert_eq!(violations.len(), 1);
}

#[rstest]
fn rejects_files_outside_the_linted_layers() {
    let result = lint_one("main.rs", "fn main() {}");
    assert!(matches!(result, Err(ArchitectureLintError::Parse { .. })));
}

#[rstest]
fn rejects_unparseable_sources() {
    let result = lint_one("domain/broken.rs", "fn (");
    assert!(matches!(result, Err(ArchitectureLintError::Parse { .. })));
}
