//! Subcommand parsing and execution.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing::info;

use launchpad_core::Error;
use launchpad_groups::{Group, GroupManager};

/// A parsed subcommand. `group` arguments are an id or a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Projects,
    Create { name: String },
    Rename { group: String, name: String },
    Delete { group: String },
    Add { group: String, path: String },
    Remove { group: String, path: String },
    Toggle { group: String, path: String },
    State { group: String, path: String },
    Open { group: String },
    Export { file: Option<PathBuf> },
    Import { file: PathBuf },
    Help,
}

impl Command {
    /// Parse arguments (without the program name).
    pub fn parse(args: &[String]) -> anyhow::Result<Self> {
        let Some((name, rest)) = args.split_first() else {
            return Ok(Self::List);
        };
        let arg = |i: usize, what: &str| -> anyhow::Result<String> {
            rest.get(i)
                .cloned()
                .with_context(|| format!("{}: missing <{}>", name, what))
        };

        let command = match name.as_str() {
            "list" | "ls" => Self::List,
            "projects" => Self::Projects,
            "create" => Self::Create {
                name: arg(0, "name")?,
            },
            "rename" => Self::Rename {
                group: arg(0, "group")?,
                name: arg(1, "name")?,
            },
            "delete" | "rm" => Self::Delete {
                group: arg(0, "group")?,
            },
            "add" => Self::Add {
                group: arg(0, "group")?,
                path: arg(1, "path")?,
            },
            "remove" => Self::Remove {
                group: arg(0, "group")?,
                path: arg(1, "path")?,
            },
            "toggle" => Self::Toggle {
                group: arg(0, "group")?,
                path: arg(1, "path")?,
            },
            "state" => Self::State {
                group: arg(0, "group")?,
                path: arg(1, "path")?,
            },
            "open" => Self::Open {
                group: arg(0, "group")?,
            },
            "export" => Self::Export {
                file: rest.first().map(PathBuf::from),
            },
            "import" => Self::Import {
                file: PathBuf::from(arg(0, "file")?),
            },
            "--help" | "-h" | "help" => Self::Help,
            other => bail!("Unknown command: {}", other),
        };
        Ok(command)
    }
}

pub fn print_help(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Launchpad — project groups for your editor")?;
    writeln!(out)?;
    writeln!(out, "Usage: launchpad [command]")?;
    writeln!(out)?;
    writeln!(out, "Commands:")?;
    writeln!(out, "  list                     List groups and their projects (default)")?;
    writeln!(out, "  projects                 List every project with its group")?;
    writeln!(out, "  create <name>            Create an empty group")?;
    writeln!(out, "  rename <group> <name>    Rename a group")?;
    writeln!(out, "  delete <group>           Delete a group")?;
    writeln!(out, "  add <group> <path>       Add a project folder to a group")?;
    writeln!(out, "  remove <group> <path>    Remove a project from a group")?;
    writeln!(out, "  toggle <group> <path>    Enable or disable a project")?;
    writeln!(out, "  state <group> <path>     Print whether a project is enabled")?;
    writeln!(out, "  open <group>             Print enabled project paths in open order")?;
    writeln!(out, "  export [file]            Write groups as JSON (stdout if no file)")?;
    writeln!(out, "  import <file>            Replace all groups from a JSON file")?;
    writeln!(out, "  help                     Show this help message")?;
    writeln!(out)?;
    writeln!(out, "<group> is a group id or name.")?;
    Ok(())
}

/// Find a group by id, then by name.
fn resolve(manager: &GroupManager, group: &str) -> Result<Group, Error> {
    manager
        .get(group)
        .or_else(|| manager.find_by_name(group))
        .ok_or_else(|| Error::NotFound(format!("group {}", group)))
}

/// Run one command against `manager`, writing user output to `out`.
pub fn run(manager: &GroupManager, command: Command, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::List => {
            let groups = manager.groups();
            if groups.is_empty() {
                writeln!(out, "No project groups found. Create a group first.")?;
            }
            for group in groups {
                writeln!(
                    out,
                    "{} [{}] {}",
                    group.name,
                    group.id,
                    group.summary().description()
                )?;
                for project in &group.projects {
                    let mark = if project.enabled { 'x' } else { ' ' };
                    writeln!(out, "  [{}] {}", mark, project.path)?;
                }
            }
        }
        Command::Projects => {
            let entries = manager.all_projects();
            if entries.is_empty() {
                writeln!(out, "No projects found. Add projects to your groups first.")?;
            }
            for entry in entries {
                let disabled = if entry.project.enabled { "" } else { " (disabled)" };
                writeln!(
                    out,
                    "{}{}\t{}\tGroup: {}",
                    entry.project.display_name(),
                    disabled,
                    entry.project.path,
                    entry.group_name
                )?;
            }
        }
        Command::Create { name } => {
            let group = manager.create_group(&name)?;
            writeln!(out, "Created group {} [{}]", group.name, group.id)?;
        }
        Command::Rename { group, name } => {
            let group = resolve(manager, &group)?;
            manager.update_group_name(&group.id, &name)?;
            writeln!(out, "Renamed {} to {}", group.name, name.trim())?;
        }
        Command::Delete { group } => {
            let group = resolve(manager, &group)?;
            manager.delete_group(&group.id)?;
            writeln!(out, "Deleted group {}", group.name)?;
        }
        Command::Add { group, path } => {
            let group = resolve(manager, &group)?;
            if manager.add_project_to_group(&group.id, &path)? {
                writeln!(out, "Added {} to {}", path.trim(), group.name)?;
            } else {
                writeln!(out, "{} is already in {}", path.trim(), group.name)?;
            }
        }
        Command::Remove { group, path } => {
            let group = resolve(manager, &group)?;
            if manager.remove_project_from_group(&group.id, &path)? {
                writeln!(out, "Removed {} from {}", path.trim(), group.name)?;
            } else {
                writeln!(out, "{} is not in {}", path.trim(), group.name)?;
            }
        }
        Command::Toggle { group, path } => {
            let group = resolve(manager, &group)?;
            if !manager.toggle_project_enabled(&group.id, &path)? {
                bail!("{} is not in {}", path.trim(), group.name);
            }
            let state = if manager.project_state(&group.id, &path) {
                "enabled"
            } else {
                "disabled"
            };
            writeln!(out, "{} {}", path.trim(), state)?;
        }
        Command::State { group, path } => {
            // Unknown groups read as enabled, same as unknown paths.
            let id = manager
                .get(&group)
                .or_else(|| manager.find_by_name(&group))
                .map_or(group, |g| g.id);
            writeln!(out, "{}", manager.project_state(&id, &path))?;
        }
        Command::Open { group } => {
            let group = resolve(manager, &group)?;
            for project in group.enabled_projects() {
                writeln!(out, "{}", project.path)?;
            }
        }
        Command::Export { file } => {
            let json = manager.export_json()?;
            match file {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!("Exported {} groups to {}", manager.len(), path.display());
                    writeln!(out, "Exported {} group(s) to {}", manager.len(), path.display())?;
                }
                None => writeln!(out, "{}", json)?,
            }
        }
        Command::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let count = manager.import_json(&text)?;
            writeln!(out, "Imported {} group(s)", count)?;
        }
        Command::Help => print_help(out)?,
    }
    Ok(())
}
