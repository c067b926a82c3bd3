//! # group 命令实现
//!
//! 分组的创建、成员增删与查看。
//!
//! ## 依赖关系
//! - 使用 `cli/group.rs` 定义的参数
//! - 使用 `store/`, `models/group.rs`

use crate::cli::group::GroupCommands;
use crate::error::Result;
use crate::models::group::by_element;
use crate::models::{DataKind, GaussianRecord, Group};
use crate::store::RecordStore;
use crate::utils::output;

use super::list::RecordRow;
use tabled::{Table, Tabled};

/// 分组表格行
#[derive(Debug, Clone, Tabled)]
struct GroupRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Records")]
    records: usize,
    #[tabled(rename = "Description")]
    description: String,
}

/// 执行 group 命令
pub fn execute(cmd: GroupCommands, store: &mut dyn RecordStore) -> Result<()> {
    match cmd {
        GroupCommands::Create {
            name,
            kind,
            description,
        } => {
            let kind = DataKind::from(kind);
            store.create_group(Group::new(name.clone(), kind).with_description(description))?;
            output::print_success(&format!("Created group '{}' for {}", name, kind.plural()));
        }

        GroupCommands::Add { name, identifiers } => {
            let kind = store.group(&name)?.kind;
            for id in &identifiers {
                let record = store.resolve(kind, id)?;
                if store.add_to_group(&name, record.pk)? {
                    output::print_success(&format!(
                        "Added {} '{}' (ID {}) to '{}'",
                        record.record.element(),
                        record.record.name(),
                        record.pk,
                        name
                    ));
                } else {
                    output::print_skip(&format!("ID {} is already in '{}'", record.pk, name));
                }
            }
        }

        GroupCommands::Remove { name, identifiers } => {
            let kind = store.group(&name)?.kind;
            for id in &identifiers {
                let record = store.resolve(kind, id)?;
                if store.remove_from_group(&name, record.pk)? {
                    output::print_success(&format!("Removed ID {} from '{}'", record.pk, name));
                } else {
                    output::print_skip(&format!("ID {} is not in '{}'", record.pk, name));
                }
            }
        }

        GroupCommands::List => {
            let groups = store.groups()?;
            if groups.is_empty() {
                output::print_info("No groups found.");
                return Ok(());
            }
            let rows: Vec<GroupRow> = groups
                .into_iter()
                .map(|g| GroupRow {
                    kind: g.kind.tag(),
                    records: g.members.len(),
                    description: g.description.unwrap_or_default(),
                    name: g.name,
                })
                .collect();
            println!("{}", Table::new(&rows));
        }

        GroupCommands::Show { name, elements } => {
            let group = store.group(&name)?;
            let members = store.group_members(&name)?;
            let by_sym = by_element(&group, members, &elements)?;

            output::print_header(&format!("{} ({})", group.name, group.kind.plural()));
            if let Some(desc) = &group.description {
                output::print_info(desc);
            }
            for (element, records) in &by_sym {
                output::print_info(&format!("{}:", element));
                let rows: Vec<RecordRow> = records.iter().map(RecordRow::from).collect();
                println!("{}", Table::new(&rows));
            }
        }
    }

    Ok(())
}
