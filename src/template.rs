//! Command template rendering and process construction
//!
//! A [`CommandTemplate`] carries the shell invocation plus the command
//! string with its fuzz terms. Rendering replaces every occurrence of each
//! positional fuzz term with the matching task value; the result becomes
//! the final argument of the shell process.

use tokio::process::Command;

use crate::config::ShellConfig;

/// One parameterized command: shell executable, base arguments, command
/// string and fuzz term. Immutable after construction; values are supplied
/// per task at render time.
#[derive(Clone, Debug)]
pub struct CommandTemplate {
    shell: String,
    shell_args: Vec<String>,
    command: String,
    fuzz_term: String,
}

impl CommandTemplate {
    /// Build a template from the shell configuration and command string
    pub fn new(shell: &ShellConfig, command: impl Into<String>) -> Self {
        Self {
            shell: shell.shell.clone(),
            shell_args: shell.shell_args.clone(),
            command: command.into(),
            fuzz_term: shell.fuzz_term.clone(),
        }
    }

    /// The fuzz term for a wordlist position.
    ///
    /// The `{}` span is rendered empty for index 0, then as `"2"`, `"3"`,
    /// ... for subsequent positions.
    pub fn term(&self, index: usize) -> String {
        if index == 0 {
            self.fuzz_term.replace("{}", "")
        } else {
            self.fuzz_term.replace("{}", &(index + 1).to_string())
        }
    }

    /// The command string with every fuzz term occurrence replaced by its
    /// positional value
    pub fn render(&self, values: &[String]) -> String {
        let mut command = self.command.clone();
        for (index, value) in values.iter().enumerate() {
            let needle = self.term(index);
            command = command.replace(&needle, value);
        }
        command
    }

    /// An invocable process for one task: shell + base args + rendered
    /// command string as the final argument
    pub fn command(&self, values: &[String]) -> Command {
        let mut command = Command::new(&self.shell);
        command.args(&self.shell_args).arg(self.render(values));
        command
    }

    /// The shell executable
    pub fn shell(&self) -> &str {
        &self.shell
    }

    /// The base shell arguments
    pub fn shell_args(&self) -> &[String] {
        &self.shell_args
    }

    /// The raw, unrendered command string
    pub fn command_string(&self) -> &str {
        &self.command
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn template(command: &str) -> CommandTemplate {
        CommandTemplate::new(&ShellConfig::default(), command)
    }

    #[test]
    fn test_term_index_zero_renders_empty_span() {
        assert_eq!(template("x").term(0), "FUZZ");
    }

    #[test]
    fn test_term_later_indices_render_position_plus_one() {
        let t = template("x");
        assert_eq!(t.term(1), "FUZ2Z");
        assert_eq!(t.term(2), "FUZ3Z");
        assert_eq!(t.term(9), "FUZ10Z");
    }

    #[test]
    fn test_term_with_custom_fuzz_pattern() {
        let shell = ShellConfig {
            fuzz_term: "%{}%".to_string(),
            ..ShellConfig::default()
        };
        let t = CommandTemplate::new(&shell, "x");
        assert_eq!(t.term(0), "%%");
        assert_eq!(t.term(1), "%2%");
    }

    #[test]
    fn test_render_substitutes_all_positions() {
        let t = template("login -u FUZZ -p FUZ2Z");
        let rendered = t.render(&["alice".to_string(), "pw1".to_string()]);
        assert_eq!(rendered, "login -u alice -p pw1");
    }

    #[test]
    fn test_render_replaces_repeated_occurrences() {
        let t = template("echo FUZZ FUZZ");
        assert_eq!(t.render(&["hi".to_string()]), "echo hi hi");
    }

    #[test]
    fn test_render_without_placeholders_is_identity() {
        let t = template("uname -a");
        assert_eq!(t.render(&["unused".to_string()]), "uname -a");
    }

    #[test]
    fn test_render_full_login_matrix() {
        let t = template("login -u FUZZ -p FUZ2Z");
        let users = ["alice", "bob"];
        let passwords = ["pw1", "pw2"];
        let mut rendered = Vec::new();
        for user in users {
            for password in passwords {
                rendered.push(t.render(&[user.to_string(), password.to_string()]));
            }
        }
        assert_eq!(
            rendered,
            [
                "login -u alice -p pw1",
                "login -u alice -p pw2",
                "login -u bob -p pw1",
                "login -u bob -p pw2",
            ]
        );
    }

    #[test]
    fn test_command_wraps_shell_and_args() {
        let t = template("echo FUZZ");
        let command = t.command(&["hello".to_string()]);
        let std_command = command.as_std();
        assert_eq!(std_command.get_program(), t.shell());
        let args: Vec<_> = std_command.get_args().collect();
        assert_eq!(args.last().unwrap().to_str().unwrap(), "echo hello");
    }
}
