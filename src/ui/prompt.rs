// Netprofile - Console Prompts
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Line-based prompts over any reader/writer pair.
//!
//! End of input is treated as "cancel" everywhere, so a closed stdin ends
//! the session instead of looping.

use std::fmt::Display;
use std::io::{self, BufRead, Stdin, Stdout, Write};

use crate::engine::AdapterSelector;
use crate::models::{AdapterInfo, Profile, Result};

/// Operator console.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, Stdout> {
    /// Console on the process stdin/stdout.
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Get the output sink.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Print one line.
    pub fn say(&mut self, text: impl Display) {
        let _ = writeln!(self.output, "{}", text);
    }

    /// Ask for a line of input. `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> Option<String> {
        let _ = write!(self.output, "{}", prompt);
        let _ = self.output.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    /// Ask until `check` accepts the answer. Blank answers are returned
    /// as-is when `allow_blank` is set.
    pub fn ask_valid<T>(
        &mut self,
        prompt: &str,
        allow_blank: bool,
        check: impl Fn(&str) -> Result<T>,
    ) -> Option<String> {
        loop {
            let answer = self.ask(prompt)?;
            if answer.is_empty() && allow_blank {
                return Some(answer);
            }
            match check(&answer) {
                Ok(_) => return Some(answer),
                Err(e) => self.say(format!("{}. Please try again.", e)),
            }
        }
    }

    /// Yes/no question.
    pub fn confirm(&mut self, prompt: &str, default: bool) -> bool {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        match self.ask(&format!("{} {} ", prompt, hint)) {
            Some(answer) => match answer.to_lowercase().as_str() {
                "y" | "yes" => true,
                "n" | "no" => false,
                _ => default,
            },
            None => false,
        }
    }

    /// Numbered choice from `items`. Blank input or end of input cancels.
    pub fn choose(&mut self, title: &str, items: &[String]) -> Option<usize> {
        if items.is_empty() {
            return None;
        }
        self.say(title);
        for (i, item) in items.iter().enumerate() {
            self.say(format!("{}. {}", i + 1, item));
        }
        let prompt = format!("Enter a number (1-{}, blank to cancel): ", items.len());
        loop {
            let answer = self.ask(&prompt)?;
            if answer.is_empty() {
                return None;
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=items.len()).contains(&n) => return Some(n - 1),
                _ => self.say("Invalid choice."),
            }
        }
    }

    /// Choose an adapter from `adapters`, returning its name.
    pub fn choose_adapter(&mut self, title: &str, adapters: &[AdapterInfo]) -> Option<String> {
        let labels: Vec<String> = adapters.iter().map(AdapterInfo::display_label).collect();
        self.choose(title, &labels).map(|index| adapters[index].name.clone())
    }
}

impl<R: BufRead, W: Write> AdapterSelector for Console<R, W> {
    fn select_replacement(
        &mut self,
        profile: &Profile,
        adapters: &[AdapterInfo],
    ) -> Option<String> {
        self.say(format!(
            "Warning: adapter '{}' of profile '{}' was not found.",
            profile.adapter, profile.name
        ));
        let choice = self.choose_adapter("Select an adapter to apply this profile to:", adapters);
        match &choice {
            Some(adapter) => self.say(format!("Using adapter '{}'.", adapter)),
            None => self.say("No adapter selected; profile not applied."),
        }
        choice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validation::validate_ipv4;
    use crate::models::AdapterType;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn printed(console: &Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(console.output()).into_owned()
    }

    #[test]
    fn test_ask_trims_and_detects_eof() {
        let mut c = console("  hello \n");
        assert_eq!(c.ask("> ").as_deref(), Some("hello"));
        assert_eq!(c.ask("> "), None);
    }

    #[test]
    fn test_choose_retries_invalid_input() {
        let items = vec!["Ethernet".to_string(), "Wi-Fi".to_string()];
        let mut c = console("abc\n7\n2\n");
        assert_eq!(c.choose("Adapters:", &items), Some(1));
        assert_eq!(printed(&c).matches("Invalid choice.").count(), 2);
    }

    #[test]
    fn test_choose_blank_cancels() {
        let items = vec!["Ethernet".to_string()];
        assert_eq!(console("\n").choose("Adapters:", &items), None);
        assert_eq!(console("").choose("Adapters:", &items), None);
        assert_eq!(console("1\n").choose("Adapters:", &[]), None);
    }

    #[test]
    fn test_ask_valid() {
        let mut c = console("300.1.1.1\n10.0.0.1\n");
        assert_eq!(
            c.ask_valid("IP: ", false, validate_ipv4).as_deref(),
            Some("10.0.0.1")
        );
        assert!(printed(&c).contains("Invalid IP address: 300.1.1.1"));

        let mut blank = console("\n");
        let gateway = blank.ask_valid("Gateway: ", true, validate_ipv4);
        assert_eq!(gateway.as_deref(), Some(""));
    }

    #[test]
    fn test_confirm() {
        assert!(console("y\n").confirm("Overwrite?", false));
        assert!(!console("\n").confirm("Overwrite?", false));
        assert!(console("\n").confirm("Overwrite?", true));
        assert!(!console("").confirm("Overwrite?", true));
    }

    #[test]
    fn test_select_replacement() {
        let adapters = vec![
            AdapterInfo::new("Ethernet 2", AdapterType::Dedicated),
            AdapterInfo::new("Wi-Fi", AdapterType::Dedicated),
        ];
        let profile = Profile::new_dhcp("cafe", "Wi-Fi 3");
        let mut c = console("2\n");
        let choice = c.select_replacement(&profile, &adapters);
        assert_eq!(choice.as_deref(), Some("Wi-Fi"));
        assert!(printed(&c).contains("adapter 'Wi-Fi 3' of profile 'cafe' was not found"));
    }
}
