//! # list 命令实现
//!
//! 以表格列出已存储的记录，可选导出为 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/data.rs` 定义的参数
//! - 使用 `store/`, `utils/output.rs`

use crate::cli::data::ListArgs;
use crate::error::{GdtError, Result};
use crate::models::{DataKind, GaussianRecord, StoredRecord};
use crate::store::{QueryFilter, RecordStore};
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};

/// 记录表格行
#[derive(Debug, Clone, Tabled)]
pub struct RecordRow {
    #[tabled(rename = "ID")]
    pub id: u64,
    #[tabled(rename = "Sym")]
    pub sym: String,
    #[tabled(rename = "Names")]
    pub names: String,
    #[tabled(rename = "Tags")]
    pub tags: String,
    #[tabled(rename = "Val. e⁻")]
    pub valence: String,
    #[tabled(rename = "Version")]
    pub version: u32,
    #[tabled(rename = "UUID")]
    pub uuid: String,
}

impl From<&StoredRecord> for RecordRow {
    fn from(stored: &StoredRecord) -> Self {
        let r = &stored.record;
        RecordRow {
            id: stored.pk,
            sym: r.element().to_string(),
            names: r.names_display(),
            tags: r.tags().join(" "),
            valence: r.valence_summary(),
            version: r.version(),
            uuid: stored.uuid.to_string(),
        }
    }
}

/// 执行 list 命令，返回列出的记录
pub fn execute(kind: DataKind, args: &ListArgs, store: &dyn RecordStore) -> Result<Vec<StoredRecord>> {
    let mut filter = QueryFilter::new().tags(&args.tags);
    if let Some(sym) = &args.sym {
        filter = filter.element(sym.as_str());
    }
    if let Some(name) = &args.name {
        filter = filter.name(name.as_str());
    }

    let records = store.query(kind, &filter)?;

    if records.is_empty() {
        output::print_info(&format!("No {} found.", kind.plural()));
        return Ok(records);
    }

    let rows: Vec<RecordRow> = records.iter().map(RecordRow::from).collect();
    output::print_info(&format!("{} {} found:", rows.len(), kind.plural()));
    println!("{}", Table::new(&rows));

    if let Some(path) = &args.csv {
        save_rows_csv(&rows, path)?;
        output::print_success(&format!("Table saved to '{}'", path.display()));
    }

    Ok(records)
}

/// 保存表格到 CSV
fn save_rows_csv(rows: &[RecordRow], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["id", "element", "names", "tags", "n_el", "version", "uuid"])?;

    for row in rows {
        wtr.write_record([
            row.id.to_string(),
            row.sym.clone(),
            row.names.clone(),
            row.tags.clone(),
            row.valence.clone(),
            row.version.to_string(),
            row.uuid.clone(),
        ])?;
    }

    wtr.flush().map_err(|e| GdtError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::cp2k_pseudo;
    use crate::store::MemoryStore;
    use crate::testdata;
    use tempfile::tempdir;

    fn populated() -> MemoryStore {
        let mut store = MemoryStore::new();
        for p in cp2k_pseudo::parse_pseudos(testdata::GTH_POTENTIALS, None) {
            store.create(p.unwrap().into()).unwrap();
        }
        store
    }

    #[test]
    fn test_filters() {
        let store = populated();

        let args = ListArgs {
            sym: Some("he".to_string()),
            ..Default::default()
        };
        assert_eq!(execute(DataKind::Pseudo, &args, &store).unwrap().len(), 2);

        let args = ListArgs {
            name: Some("GTH-PBE".to_string()),
            ..Default::default()
        };
        assert_eq!(execute(DataKind::Pseudo, &args, &store).unwrap().len(), 3);

        let args = ListArgs {
            tags: vec!["NLCC".to_string()],
            ..Default::default()
        };
        let found = execute(DataKind::Pseudo, &args, &store).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].record.element(), "C");

        assert!(execute(DataKind::BasisSet, &ListArgs::default(), &store)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_csv_export() {
        let store = populated();
        let dir = tempdir().unwrap();
        let path = dir.path().join("list.csv");

        let args = ListArgs {
            sym: Some("Li".to_string()),
            csv: Some(path.clone()),
            ..Default::default()
        };
        execute(DataKind::Pseudo, &args, &store).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], "Li");
        assert_eq!(&rows[0][2], "GTH-PBE-q3, GTH-PBE");
        assert_eq!(&rows[0][4], "3");
    }
}
