// Netprofile - Interactive Menu
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Numbered main menu driving a [`Session`].
//!
//! Every action reports its own errors and returns to the menu, except for
//! fatal ones (missing configuration tool), which end the session.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use super::prompt::Console;
use crate::backend::NetworkConfigProvider;
use crate::models::validation::{
    parse_dns_list, prefix_length, validate_dns_server, validate_ipv4, validate_profile_name,
    validate_subnet_mask,
};
use crate::models::{AddressMode, ApplicationResult, OperationOutcome, Profile, Result};
use crate::session::{Session, SessionApply};

const MENU: &[&str] = &[
    "List network adapters",
    "List profiles",
    "Create profile",
    "Apply profile",
    "Switch adapter to DHCP",
    "Save profiles",
    "Exit",
];

/// Run the menu until the operator exits or input ends.
pub fn run<P, R, W>(session: &mut Session<P>, console: &mut Console<R, W>) -> Result<()>
where
    P: NetworkConfigProvider,
    R: BufRead,
    W: Write,
{
    loop {
        console.say("");
        console.say("=== Netprofile ===");
        for (i, entry) in MENU.iter().enumerate() {
            console.say(format!("{}. {}", i + 1, entry));
        }

        let Some(choice) = console.ask("Select an option: ") else {
            debug!("Input closed, leaving menu");
            finish(session, console);
            return Ok(());
        };

        let outcome = match choice.as_str() {
            "1" => list_adapters(session, console),
            "2" => {
                list_profiles(session, console);
                Ok(())
            }
            "3" => create_profile(session, console),
            "4" => apply_profile(session, console),
            "5" => switch_to_dhcp(session, console),
            "6" => save(session, console),
            "7" => {
                finish(session, console);
                return Ok(());
            }
            _ => {
                console.say("Invalid option.");
                Ok(())
            }
        };

        if let Err(e) = outcome {
            if e.is_fatal() {
                return Err(e);
            }
            console.say(format!("Error: {}", e));
        }
    }
}

/// Print the per-step outcome of an application.
pub fn report_application<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    result: &ApplicationResult,
) {
    for step in &result.steps {
        match &step.outcome {
            OperationOutcome::Success => console.say(format!("  [ok] {}", step.operation)),
            OperationOutcome::Failed(reason) => {
                console.say(format!("  [failed] {}: {}", step.operation, reason))
            }
        }
    }
    match result.aborted_at() {
        Some(index) => console.say(format!(
            "  Stopped at step {}; the remaining operations were not run.",
            index + 1
        )),
        None if result.failure_count() > 0 => console.say(format!(
            "  {} operation(s) failed; the others were applied.",
            result.failure_count()
        )),
        None => {}
    }
    console.say(&result.message);
}

/// Print the outcome of applying a stored profile, including any rebinding.
pub fn report_apply<R: BufRead, W: Write>(console: &mut Console<R, W>, outcome: &SessionApply) {
    let applied = &outcome.applied;
    if let Some(previous) = &applied.rebound_from {
        let profile = applied.result.profile.as_deref().unwrap_or_default();
        console.say(format!(
            "Profile '{}' now uses '{}' instead of '{}'.",
            profile, applied.adapter, previous
        ));
    }
    if let Some(e) = &outcome.save_error {
        console.say(format!("Warning: new adapter not saved: {}", e));
    }
    report_application(console, &applied.result);
}

fn finish<P, R, W>(session: &mut Session<P>, console: &mut Console<R, W>)
where
    P: NetworkConfigProvider,
    R: BufRead,
    W: Write,
{
    if session.has_unsaved_changes() {
        if console.confirm("There are unsaved changes. Save before exiting?", true) {
            if let Err(e) = session.save() {
                console.say(format!("Error: {}", e));
            }
        } else {
            warn!("Exiting with unsaved profile changes");
        }
    }
    console.say("Goodbye.");
}

pub fn list_adapters<P, R, W>(session: &Session<P>, console: &mut Console<R, W>) -> Result<()>
where
    P: NetworkConfigProvider,
    R: BufRead,
    W: Write,
{
    let adapters = session.adapters()?;
    if adapters.is_empty() {
        console.say("No network adapters found.");
        return Ok(());
    }
    console.say("Network adapters:");
    for adapter in &adapters {
        console.say(format!(
            "  {} [{}] {}",
            adapter.display_label(),
            adapter.adapter_type.display_name(),
            adapter.admin_state
        ));
    }
    Ok(())
}

pub fn list_profiles<P, R, W>(session: &Session<P>, console: &mut Console<R, W>)
where
    P: NetworkConfigProvider,
    R: BufRead,
    W: Write,
{
    if session.store().is_empty() {
        console.say("No profiles saved.");
        return;
    }
    console.say("Profiles:");
    for profile in session.store().all().values() {
        console.say(format!("  {}", describe(profile)));
    }
}

fn describe(profile: &Profile) -> String {
    match profile.mode {
        AddressMode::Dhcp => format!("{}: {} (DHCP)", profile.name, profile.adapter),
        AddressMode::Static => {
            let address = match validate_subnet_mask(&profile.subnet) {
                Ok(mask) => format!("{}/{}", profile.ip, prefix_length(mask)),
                Err(_) => format!("{} mask {}", profile.ip, profile.subnet),
            };
            let mut line = format!("{}: {}, {}", profile.name, profile.adapter, address);
            if let Some(gateway) = &profile.gateway {
                line.push_str(&format!(", gateway {}", gateway));
            }
            if !profile.dns.is_empty() {
                line.push_str(&format!(", DNS {}", profile.dns.join(", ")));
            }
            line
        }
    }
}

pub fn create_profile<P, R, W>(session: &mut Session<P>, console: &mut Console<R, W>) -> Result<()>
where
    P: NetworkConfigProvider,
    R: BufRead,
    W: Write,
{
    let Some(name) = console.ask_valid("Profile name: ", false, validate_profile_name) else {
        return Ok(());
    };
    if session.store().contains(&name)
        && !console.confirm(&format!("Profile '{}' exists. Overwrite?", name), false)
    {
        console.say("Profile not changed.");
        return Ok(());
    }

    let adapters = session.selectable_adapters()?;
    let Some(adapter) = console.choose_adapter("Select an adapter:", &adapters) else {
        console.say("Cancelled.");
        return Ok(());
    };

    let modes = vec![
        AddressMode::Static.display_name().to_string(),
        AddressMode::Dhcp.display_name().to_string(),
    ];
    let profile = match console.choose("Address mode:", &modes) {
        Some(0) => match ask_static(console, &name, &adapter) {
            Some(profile) => profile,
            None => {
                console.say("Cancelled.");
                return Ok(());
            }
        },
        Some(_) => Profile::new_dhcp(&name, &adapter),
        None => {
            console.say("Cancelled.");
            return Ok(());
        }
    };

    let replaced = session.add_profile(profile)?;
    let action = if replaced.is_some() {
        "updated"
    } else {
        "created"
    };
    console.say(format!("Profile '{}' {}.", name, action));
    if let Err(e) = session.save() {
        console.say(format!("Warning: profile kept in memory only: {}", e));
    }
    Ok(())
}

fn ask_static<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    name: &str,
    adapter: &str,
) -> Option<Profile> {
    let ip = console.ask_valid("IP address: ", false, validate_ipv4)?;
    let subnet = console.ask_valid(
        "Subnet mask (blank for 255.255.255.0): ",
        true,
        validate_subnet_mask,
    )?;
    let gateway = console.ask_valid("Gateway (blank for none): ", true, validate_ipv4)?;
    let dns = loop {
        let answer = console.ask("DNS servers, comma separated (blank for none): ")?;
        let servers = parse_dns_list(&answer);
        match servers.iter().find_map(|d| validate_dns_server(d).err()) {
            Some(e) => console.say(format!("{}. Please try again.", e)),
            None => break servers,
        }
    };
    Some(Profile::new_static(
        name,
        adapter,
        ip,
        Some(subnet.as_str()),
        Some(gateway.as_str()),
        dns,
    ))
}

fn apply_profile<P, R, W>(session: &mut Session<P>, console: &mut Console<R, W>) -> Result<()>
where
    P: NetworkConfigProvider,
    R: BufRead,
    W: Write,
{
    if session.store().is_empty() {
        console.say("No profiles saved.");
        return Ok(());
    }
    let names = session.store().names();
    let labels: Vec<String> = session
        .store()
        .all()
        .values()
        .map(Profile::summary)
        .collect();
    let Some(index) = console.choose("Select a profile:", &labels) else {
        return Ok(());
    };

    let outcome = session.apply(&names[index], console)?;
    report_apply(console, &outcome);
    Ok(())
}

pub fn switch_to_dhcp<P, R, W>(session: &mut Session<P>, console: &mut Console<R, W>) -> Result<()>
where
    P: NetworkConfigProvider,
    R: BufRead,
    W: Write,
{
    let adapters = session.selectable_adapters()?;
    let Some(adapter) = console.choose_adapter("Select an adapter:", &adapters) else {
        return Ok(());
    };
    if !console.confirm(&format!("Switch '{}' to DHCP?", adapter), true) {
        return Ok(());
    }
    let result = session.apply_dhcp(&adapter)?;
    report_application(console, &result);
    Ok(())
}

fn save<P, R, W>(session: &mut Session<P>, console: &mut Console<R, W>) -> Result<()>
where
    P: NetworkConfigProvider,
    R: BufRead,
    W: Write,
{
    session.save()?;
    console.say(format!("Saved {} profile(s).", session.store().len()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::FakeProvider;
    use crate::backend::ProviderError;
    use crate::models::AppConfig;
    use crate::storage::{backup_file_for, JsonProfileRepository, ProfileRepository};
    use indexmap::IndexMap;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;

    fn session_at(path: &Path, adapters: &[&str]) -> Session<FakeProvider> {
        Session::open(
            AppConfig::default(),
            FakeProvider::with_adapters(adapters),
            Box::new(JsonProfileRepository::new(path)),
        )
    }

    fn drive(session: &mut Session<FakeProvider>, input: &str) -> (Result<()>, String) {
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let outcome = run(session, &mut console);
        let printed = String::from_utf8_lossy(console.output()).into_owned();
        (outcome, printed)
    }

    fn seed(path: &Path, profile: Profile) {
        let mut profiles = IndexMap::new();
        profiles.insert(profile.name.clone(), profile);
        JsonProfileRepository::new(path)
            .save(&profiles)
            .expect("seed");
    }

    #[test]
    fn test_create_static_profile() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("profiles.json");
        let mut session = session_at(&path, &["Ethernet", "Wi-Fi"]);

        let input = concat!(
            "3\noffice\n1\n1\n",
            "192.168.1.500\n192.168.1.50\n\n192.168.1.1\n",
            "8.8.8.8, bogus\n8.8.8.8, 1.1.1.1\n7\n",
        );
        let (outcome, printed) = drive(&mut session, input);

        assert!(outcome.is_ok());
        assert!(printed.contains("Invalid IP address: 192.168.1.500"));
        assert!(printed.contains("Invalid DNS server: bogus"));
        assert!(printed.contains("Profile 'office' created."));

        let loaded = JsonProfileRepository::new(&path).load().expect("load");
        let office = &loaded.profiles["office"];
        assert_eq!(office.adapter, "Ethernet");
        assert_eq!(office.subnet, "255.255.255.0");
        assert_eq!(office.gateway.as_deref(), Some("192.168.1.1"));
        assert_eq!(office.dns, vec!["8.8.8.8", "1.1.1.1"]);
    }

    #[test]
    fn test_overwrite_declined() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("profiles.json");
        seed(&path, Profile::new_dhcp("home", "Wi-Fi"));
        let mut session = session_at(&path, &["Ethernet", "Wi-Fi"]);

        let (_, printed) = drive(&mut session, "3\nhome\nn\n7\n");
        assert!(printed.contains("Profile not changed."));
        let home = session.store().get("home").expect("present");
        assert_eq!(home.adapter, "Wi-Fi");
    }

    #[test]
    fn test_list_profiles_with_prefix() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("profiles.json");
        seed(
            &path,
            Profile::new_static(
                "lab",
                "Ethernet",
                "10.0.0.5",
                Some("255.255.0.0"),
                None,
                vec!["10.0.0.1".into()],
            ),
        );
        let mut session = session_at(&path, &["Ethernet"]);

        let (_, printed) = drive(&mut session, "2\n7\n");
        assert!(printed.contains("lab: Ethernet, 10.0.0.5/16, DNS 10.0.0.1"));
    }

    #[test]
    fn test_apply_with_rebind() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("profiles.json");
        seed(&path, Profile::new_dhcp("cafe", "Wi-Fi 3"));
        let mut session = session_at(&path, &["Ethernet", "Wi-Fi"]);

        let (outcome, printed) = drive(&mut session, "4\n1\n2\n7\n");
        assert!(outcome.is_ok());
        let rebound = "Profile 'cafe' now uses 'Wi-Fi' instead of 'Wi-Fi 3'.";
        assert!(printed.contains(rebound));
        assert!(printed.contains("2 operation(s) completed successfully"));

        let loaded = JsonProfileRepository::new(&path).load().expect("load");
        assert_eq!(loaded.profiles["cafe"].adapter, "Wi-Fi");
    }

    #[test]
    fn test_missing_tool_ends_session() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("profiles.json");
        let mut session = Session::open(
            AppConfig::default(),
            FakeProvider::failing_listing(ProviderError::CommandNotFound("netsh".into())),
            Box::new(JsonProfileRepository::new(&path)),
        );

        let (outcome, _) = drive(&mut session, "1\n7\n");
        assert!(outcome.expect_err("should be fatal").is_fatal());
    }

    #[test]
    fn test_recoverable_error_returns_to_menu() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("profiles.json");
        let mut session = Session::open(
            AppConfig::default(),
            FakeProvider::failing_listing(FakeProvider::rejected("Access is denied.")),
            Box::new(JsonProfileRepository::new(&path)),
        );

        let (outcome, printed) = drive(&mut session, "5\n9\n7\n");
        assert!(outcome.is_ok());
        assert!(printed.contains("Error: "));
        assert!(printed.contains("Invalid option."));
        assert!(printed.contains("Goodbye."));
    }

    #[test]
    fn test_unsaved_changes_on_eof() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("profiles.json");
        seed(&path, Profile::new_dhcp("cafe", "Wi-Fi 3"));
        let mut session = Session::open(
            AppConfig {
                save_on_rebind: false,
                ..AppConfig::default()
            },
            FakeProvider::with_adapters(&["Wi-Fi"]),
            Box::new(JsonProfileRepository::new(&path)),
        );

        // Rebind, then input ends: the exit prompt sees end of input and skips saving.
        let (outcome, printed) = drive(&mut session, "4\n1\n1\n");
        assert!(outcome.is_ok());
        assert!(printed.contains("unsaved changes"));
        assert!(session.has_unsaved_changes());
        let loaded = JsonProfileRepository::new(&path).load().expect("load");
        assert_eq!(loaded.profiles["cafe"].adapter, "Wi-Fi 3");
    }

    #[test]
    fn test_create_after_unreadable_document() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("profiles.json");
        let broken = r#"{"home": {"adapter": "Wi-Fi", "mode": "dhcp"},}"#;
        fs::write(&path, broken).expect("write document");
        let mut session = session_at(&path, &["Ethernet", "Wi-Fi"]);

        let (outcome, printed) = drive(&mut session, "3\ncafe\n1\n2\n7\n");
        assert!(outcome.is_ok());
        assert!(printed.contains("Profile 'cafe' created."));

        let kept = fs::read_to_string(backup_file_for(&path)).expect("backup");
        assert_eq!(kept, broken);
        let loaded = JsonProfileRepository::new(&path).load().expect("load");
        assert_eq!(loaded.profiles["cafe"].adapter, "Ethernet");
    }

    fn lab_session(path: &Path, failing_call: usize) -> Session<FakeProvider> {
        seed(
            path,
            Profile::new_static(
                "lab",
                "Ethernet",
                "10.0.0.5",
                None,
                None,
                vec!["10.0.0.1".into()],
            ),
        );
        let provider = FakeProvider::with_adapters(&["Ethernet"]);
        provider.fail_call(failing_call, FakeProvider::rejected("Element not found."));
        Session::open(
            AppConfig::default(),
            provider,
            Box::new(JsonProfileRepository::new(path)),
        )
    }

    #[test]
    fn test_dns_failure_is_summarized() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut session = lab_session(&dir.path().join("profiles.json"), 1);

        let (outcome, printed) = drive(&mut session, "4\n1\n7\n");
        assert!(outcome.is_ok());
        assert!(printed.contains("[failed] Clear DNS: Reset DNS on Ethernet"));
        assert!(printed.contains("1 operation(s) failed; the others were applied."));
        assert!(printed.contains("[ok] Set Primary DNS"));
    }

    #[test]
    fn test_address_failure_is_summarized() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut session = lab_session(&dir.path().join("profiles.json"), 0);

        let (_, printed) = drive(&mut session, "4\n1\n7\n");
        let stopped = "Stopped at step 1; the remaining operations were not run.";
        assert!(printed.contains(stopped));
        assert!(!printed.contains("Set Primary DNS"));
    }

    #[test]
    fn test_switch_to_dhcp() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("profiles.json");
        let mut session = session_at(&path, &["Ethernet"]);

        let (_, printed) = drive(&mut session, "5\n1\ny\n7\n");
        assert!(printed.contains("[ok] Set DHCP Address"));
    }
}
