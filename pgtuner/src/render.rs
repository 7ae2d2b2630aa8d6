//! Rendering derived settings for a database server.
//!
//! Two output shapes are supported:
//!
//! - [`OutputFormat::Conf`]: `name = value` lines for postgresql.conf
//! - [`OutputFormat::AlterSystem`]: `ALTER SYSTEM SET` statements for psql
//!
//! Parameters are listed in name order. Memory values are rewritten to the
//! unit spelling the server accepts (`kB` rather than `KB`, `B` for raw bytes).

use std::fmt;
use std::str::FromStr;

use crate::engine::Parameter;
use crate::profile::ProfileField;
use crate::tuner::Tuner;

/// Shape of the rendered settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// postgresql.conf lines
    #[default]
    Conf,
    /// ALTER SYSTEM statements
    AlterSystem,
}

impl OutputFormat {
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Conf, OutputFormat::AlterSystem]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Conf => "conf",
            OutputFormat::AlterSystem => "alter-system",
        }
    }

    fn comment_prefix(&self) -> &'static str {
        match self {
            OutputFormat::Conf => "#",
            OutputFormat::AlterSystem => "--",
        }
    }

    fn line(&self, name: &str, value: &str) -> String {
        match self {
            OutputFormat::Conf => format!("{} = {}", name, value),
            OutputFormat::AlterSystem => format!("ALTER SYSTEM SET {} = '{}';", name, value),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "conf" => Ok(OutputFormat::Conf),
            "alter-system" => Ok(OutputFormat::AlterSystem),
            _ => Err(()),
        }
    }
}

/// Render every derived setting of `tuner`.
///
/// With `include_profile`, the output starts with comment lines describing the
/// profile the values were derived from.
pub fn render(tuner: &Tuner, format: OutputFormat, include_profile: bool) -> String {
    let mut out = String::new();

    if include_profile {
        let prefix = format.comment_prefix();
        out.push_str(&format!("{} Generated by pgtuner {}\n", prefix, crate::VERSION));
        for field in ProfileField::all() {
            let value = field.get(tuner.profile());
            let value = if value.is_empty() {
                "unspecified"
            } else {
                value.as_str()
            };
            out.push_str(&format!("{} {}: {}\n", prefix, field.name(), value));
        }
        out.push('\n');
    }

    for (name, value) in tuner.all_settings() {
        let is_memory = name.parse::<Parameter>().is_ok_and(|p| p.is_memory());
        let value = if is_memory {
            server_memory_unit(&value)
        } else {
            value
        };
        out.push_str(&format.line(&name, &value));
        out.push('\n');
    }

    out
}

/// Rewrite a formatted memory value in the server's unit spelling.
fn server_memory_unit(value: &str) -> String {
    if let Some(kb) = value.strip_suffix("KB") {
        format!("{}kB", kb)
    } else if value.ends_with("MB") || value.ends_with("GB") {
        value.to_string()
    } else {
        format!("{}B", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuner() -> Tuner {
        Tuner::new("web", "13", "linux", "16GB", "", "ssd", "4").unwrap()
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("conf".parse::<OutputFormat>(), Ok(OutputFormat::Conf));
        assert_eq!(
            "ALTER-SYSTEM".parse::<OutputFormat>(),
            Ok(OutputFormat::AlterSystem)
        );
        assert!("yaml".parse::<OutputFormat>().is_err());
        for format in OutputFormat::all() {
            assert_eq!(format.as_str().parse::<OutputFormat>(), Ok(*format));
        }
    }

    #[test]
    fn test_conf_output() {
        let out = render(&tuner(), OutputFormat::Conf, false);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), tuner().all_settings().len());
        assert!(lines.contains(&"shared_buffers = 4GB"));
        assert!(lines.contains(&"max_connections = 200"));
        assert!(lines.contains(&"work_mem = 10485kB"));
        assert!(lines.contains(&"random_page_cost = 1.1"));
    }

    #[test]
    fn test_conf_output_sorted_by_name() {
        let out = render(&tuner(), OutputFormat::Conf, false);
        let names: Vec<&str> = out
            .lines()
            .filter_map(|l| l.split(" = ").next())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_alter_system_output() {
        let out = render(&tuner(), OutputFormat::AlterSystem, false);
        assert!(out.contains("ALTER SYSTEM SET shared_buffers = '4GB';\n"));
        assert!(out.contains("ALTER SYSTEM SET checkpoint_completion_target = '0.9';\n"));
        assert!(out.lines().all(|l| l.starts_with("ALTER SYSTEM SET ")));
    }

    #[test]
    fn test_profile_header() {
        let conf = render(&tuner(), OutputFormat::Conf, true);
        assert!(conf.starts_with("# Generated by pgtuner"));
        assert!(conf.contains("# type: web\n"));
        assert!(conf.contains("# memory: 16GB\n"));
        assert!(conf.contains("# connections: unspecified\n"));
        assert!(conf.contains("# cpu: 4\n"));

        let sql = render(&tuner(), OutputFormat::AlterSystem, true);
        assert!(sql.contains("-- version: 13\n"));
    }

    #[test]
    fn test_server_memory_unit() {
        assert_eq!(server_memory_unit("4GB"), "4GB");
        assert_eq!(server_memory_unit("16MB"), "16MB");
        assert_eq!(server_memory_unit("10485KB"), "10485kB");
        assert_eq!(server_memory_unit("32"), "32B");
    }
}
