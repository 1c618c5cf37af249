//! systemd unit for the application

use anyhow::Result;

use super::files;
use crate::session::Session;
use crate::templates::ServiceConfig;
use crate::ui;

pub fn setup_service(session: &mut Session<'_>) -> Result<()> {
    ui::action("setting up systemd service");

    let config = session.config;
    let service = ServiceConfig::new(
        &config.app_service_name,
        &config.app_dir,
        &config.app_start_cmd,
        |dir| session.is_dir(dir),
    )?;

    let unit_path = config.systemd_dir.join(service.unit_file_name());
    let unit = service.render();

    if files::offer_replace(session, &unit_path, &unit, "systemd service")?.should_write() {
        ui::action(&format!("writing {}", unit_path.display()));
        files::write(session, &unit_path, &unit)?;
    }

    reload_systemd(session)
}

pub fn reload_systemd(session: &mut Session<'_>) -> Result<()> {
    ui::action("reloading SystemD configs");
    session.sudo("systemctl", ["daemon-reload"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingHost, ScriptedPrompt};
    use crate::validate::ValidationError;
    use std::path::{Path, PathBuf};

    const UNIT: &str = "/etc/systemd/system/MySite.service";
    const APP_DIR: &str = "/home/admin/app";

    fn rendered() -> String {
        ServiceConfig::new("MySite", Path::new(APP_DIR), "npm run start", |_| true)
            .unwrap()
            .render()
    }

    fn run_setup(host: &mut RecordingHost, answers: &[&str]) -> Result<()> {
        run_setup_with(&crate::config::Config::default(), host, answers)
    }

    fn run_setup_with(
        config: &crate::config::Config,
        host: &mut RecordingHost,
        answers: &[&str],
    ) -> Result<()> {
        let mut prompt = ScriptedPrompt::new(answers.iter().copied());
        setup_service(&mut Session::new(
            config,
            host,
            &mut prompt,
            Err(pkgkit::Error::UnknownPackageManager("none".to_string())),
        ))
    }

    #[test]
    fn test_writes_new_unit() {
        let mut host = RecordingHost::new().with_dir(APP_DIR);
        run_setup(&mut host, &[]).unwrap();

        assert_eq!(
            host.commands(),
            vec![format!("sudo tee {UNIT}"), "sudo systemctl daemon-reload".to_string()]
        );
        let written = host.written(Path::new(UNIT)).unwrap();
        assert!(written.contains("Description=MySite\n"));
        assert!(written.contains("WorkingDirectory=/home/admin/app\n"));
        assert!(written.contains("ExecStart=npm run start\n"));
        assert!(written.contains("Restart=always\n"));
    }

    #[test]
    fn test_missing_app_dir_fails_without_writing() {
        let mut host = RecordingHost::new();
        let err = run_setup(&mut host, &[]).unwrap_err();

        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::MissingWorkingDir(PathBuf::from(APP_DIR)))
        );
        assert!(host.commands().is_empty());
    }

    #[test]
    fn test_app_dir_that_is_a_file_fails_without_writing() {
        let mut host = RecordingHost::new().with_file(APP_DIR, "not a directory");
        let err = run_setup(&mut host, &[]).unwrap_err();

        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::MissingWorkingDir(PathBuf::from(APP_DIR)))
        );
        assert!(host.commands().is_empty());
    }

    #[test]
    fn test_app_dir_behind_dangling_link_fails() {
        let mut host = RecordingHost::new().with_link(APP_DIR, "/srv/gone");
        assert!(run_setup(&mut host, &[]).is_err());
        assert!(host.commands().is_empty());
    }

    #[test]
    fn test_multiline_start_command_never_reaches_the_unit() {
        let config = crate::config::Config {
            app_start_cmd: "npm start\nUser=root\nExecStartPre=/bin/sh -c evil".to_string(),
            ..crate::config::Config::default()
        };
        let mut host = RecordingHost::new().with_dir(APP_DIR);
        let err = run_setup_with(&config, &mut host, &[]).unwrap_err();

        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::ControlCharacters {
                field: "app start command"
            })
        );
        assert!(host.commands().is_empty());
    }

    #[test]
    fn test_existing_unit_declined_is_untouched() {
        let mut host = RecordingHost::new()
            .with_dir(APP_DIR)
            .with_file(UNIT, "[Unit]\nDescription=Old\n");
        run_setup(&mut host, &["no"]).unwrap();

        assert_eq!(host.commands(), vec!["sudo systemctl daemon-reload"]);
    }

    #[test]
    fn test_existing_unit_replaced_on_yes() {
        let mut host = RecordingHost::new()
            .with_dir(APP_DIR)
            .with_file(UNIT, "[Unit]\nDescription=Old\n");
        run_setup(&mut host, &["y"]).unwrap();

        assert_eq!(
            host.commands(),
            vec![
                format!("sudo rm -f {UNIT}"),
                format!("sudo tee {UNIT}"),
                "sudo systemctl daemon-reload".to_string(),
            ]
        );
        assert_eq!(host.written(Path::new(UNIT)), Some(rendered().as_str()));
    }

    #[test]
    fn test_identical_unit_skips_prompt() {
        let mut host = RecordingHost::new()
            .with_dir(APP_DIR)
            .with_file(UNIT, &rendered());
        run_setup(&mut host, &[]).unwrap();

        assert_eq!(host.commands(), vec!["sudo systemctl daemon-reload"]);
    }
}
