//! [`SqliteStore`] — the SQLite implementation of [`StateStore`].

use std::path::Path;

use khata_core::{
  Collection, Record, Snapshot,
  store::StateStore,
  sync::{OFFICER_ROLE, SyncUser, Target, Territory, VehiclePerf},
};
use rusqlite::types::Value as SqlValue;
use serde_json::Value as JsonValue;

use crate::{
  Error, Result,
  encode::{json_to_sql, sql_to_json},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Khata state store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All
/// statements for one store share one session, so the explicit transactions
/// in the sync operations cover exactly their own statements.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Split a record into its column names and bound values, in field order.
  fn bind_fields(record: &Record) -> Result<(Vec<String>, Vec<SqlValue>)> {
    let mut columns = Vec::new();
    let mut values = Vec::new();
    for (column, value) in record.fields() {
      columns.push(column.to_owned());
      values.push(json_to_sql(column, value)?);
    }
    Ok((columns, values))
  }

  /// INSERT path of the generic mutator: the database assigns the id, which
  /// replaces any `new_*` sentinel in the returned record.
  async fn insert_record(
    &self,
    collection: Collection,
    mut record: Record,
  ) -> Result<Record> {
    let table = collection.table();
    let id_column = collection.id_column();
    let (columns, values) = Self::bind_fields(&record)?;

    let sql = if columns.is_empty() {
      format!("INSERT INTO {table} DEFAULT VALUES RETURNING {id_column}")
    } else {
      let placeholders = (1..=columns.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
      format!(
        "INSERT INTO {table} ({}) VALUES ({placeholders}) RETURNING {id_column}",
        columns.join(", "),
      )
    };

    let id: SqlValue = self
      .conn
      .call(move |conn| {
        let id = conn.query_row(&sql, rusqlite::params_from_iter(values), |row| {
          row.get::<_, SqlValue>(0)
        })?;
        Ok(id)
      })
      .await?;

    record.set_id(sql_to_json(id_column, id)?);
    Ok(record)
  }

  /// UPDATE path of the generic mutator. Zero-row updates succeed silently:
  /// the caller already believes the row exists.
  async fn update_record(
    &self,
    collection: Collection,
    record: Record,
    id: JsonValue,
  ) -> Result<Record> {
    let table = collection.table();
    let id_column = collection.id_column();
    let (columns, mut values) = Self::bind_fields(&record)?;

    // An item holding only its id has nothing to set.
    if columns.is_empty() {
      return Ok(record);
    }

    let assignments = columns
      .iter()
      .enumerate()
      .map(|(i, c)| format!("{c} = ?{}", i + 1))
      .collect::<Vec<_>>()
      .join(", ");
    let sql = format!(
      "UPDATE {table} SET {assignments} WHERE {id_column} = ?{}",
      columns.len() + 1,
    );
    values.push(json_to_sql(id_column, &id)?);

    self
      .conn
      .call(move |conn| {
        conn.execute(&sql, rusqlite::params_from_iter(values))?;
        Ok(())
      })
      .await?;

    Ok(record)
  }
}

// ─── StateStore impl ─────────────────────────────────────────────────────────

impl StateStore for SqliteStore {
  type Error = Error;

  // ── Snapshot reader ───────────────────────────────────────────────────────

  async fn snapshot(&self) -> Result<Snapshot> {
    // One pass over every table on the single connection; the per-collection
    // reads cannot interleave with a sync transaction.
    let raw: Vec<(Collection, Vec<Vec<SqlValue>>)> = self
      .conn
      .call(|conn| {
        let mut out = Vec::with_capacity(Collection::ALL.len());
        for collection in Collection::ALL {
          let columns = collection.columns();
          let sql =
            format!("SELECT {} FROM {}", columns.join(", "), collection.table());
          let mut stmt = conn.prepare(&sql)?;
          let rows = stmt
            .query_map([], |row| {
              let mut values = Vec::with_capacity(columns.len());
              for i in 0..columns.len() {
                values.push(row.get::<_, SqlValue>(i)?);
              }
              Ok(values)
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          out.push((collection, rows));
        }
        Ok(out)
      })
      .await?;

    let mut snapshot = Snapshot::default();
    for (collection, rows) in raw {
      let columns = collection.columns();
      match snapshot.rows_mut(collection) {
        Some(list) => {
          for values in rows {
            let mut map = serde_json::Map::with_capacity(columns.len());
            for (column, value) in columns.iter().zip(values) {
              map.insert((*column).to_owned(), sql_to_json(column, value)?);
            }
            list.push(Record(map));
          }
        }
        // admin_unlocks: fold into territory_id -> unlock_until, last row
        // wins (duplicates cannot occur under the upsert-on-territory_id
        // invariant, but the fold does not depend on that).
        None => {
          for values in rows {
            let mut it = values.into_iter();
            let (Some(key), Some(until)) = (it.next(), it.next()) else {
              continue;
            };
            let key = match sql_to_json("territory_id", key)? {
              JsonValue::String(s) => s,
              other => other.to_string(),
            };
            snapshot.unlocks.insert(key, sql_to_json("unlock_until", until)?);
          }
        }
      }
    }

    Ok(snapshot)
  }

  // ── Generic record mutator ────────────────────────────────────────────────

  async fn upsert(&self, collection: Collection, record: Record) -> Result<Record> {
    record.validate(collection)?;

    let existing_id = if record.is_new() { None } else { record.id().cloned() };
    match existing_id {
      Some(id) => self.update_record(collection, record, id).await,
      None => self.insert_record(collection, record).await,
    }
  }

  async fn remove(&self, collection: Collection, id: JsonValue) -> Result<()> {
    let id_column = collection.id_column();
    let sql =
      format!("DELETE FROM {} WHERE {id_column} = ?1", collection.table());
    let id = json_to_sql(id_column, &id)?;

    self
      .conn
      .call(move |conn| {
        // Idempotent: zero matched rows is not an error.
        conn.execute(&sql, rusqlite::params![id])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Bulk synchronizers ────────────────────────────────────────────────────

  async fn sync_targets(
    &self,
    territories: Vec<Territory>,
    targets: Vec<Target>,
  ) -> Result<()> {
    tracing::debug!(
      territories = territories.len(),
      targets = targets.len(),
      "syncing targets and territories"
    );

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          // Territories first: targets may reference ids upserted here.
          let mut stmt = tx.prepare(
            "INSERT INTO territories (id, name, part, officer)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (id) DO UPDATE SET
               name = excluded.name, part = excluded.part,
               officer = excluded.officer",
          )?;
          for t in &territories {
            stmt.execute(rusqlite::params![t.id, t.name, t.part, t.officer])?;
          }

          let mut stmt = tx.prepare(
            "INSERT INTO targets (
               territory_id, month, files, proj_files, amount, proj_reg,
               proj_adv, lm_np_target_amount, lm_np_target_files, total_od,
               od_growth_sply, per_file_od, six_plus_od_files,
               six_plus_od_growth_splm
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
             ON CONFLICT (territory_id, month) DO UPDATE SET
               files = excluded.files,
               proj_files = excluded.proj_files,
               amount = excluded.amount,
               proj_reg = excluded.proj_reg,
               proj_adv = excluded.proj_adv,
               lm_np_target_amount = excluded.lm_np_target_amount,
               lm_np_target_files = excluded.lm_np_target_files,
               total_od = excluded.total_od,
               od_growth_sply = excluded.od_growth_sply,
               per_file_od = excluded.per_file_od,
               six_plus_od_files = excluded.six_plus_od_files,
               six_plus_od_growth_splm = excluded.six_plus_od_growth_splm",
          )?;
          for t in &targets {
            stmt.execute(rusqlite::params![
              t.territory_id,
              t.month,
              t.files,
              t.proj_files,
              t.amount,
              t.proj_reg,
              t.proj_adv,
              t.lm_np_target_amount,
              t.lm_np_target_files,
              t.total_od,
              t.od_growth_sply,
              t.per_file_od,
              t.six_plus_od_files,
              t.six_plus_od_growth_splm,
            ])?;
          }
        }
        // Dropping an uncommitted transaction rolls it back, so every
        // failure path above leaves the database untouched.
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn sync_users(&self, users: Vec<SyncUser>) -> Result<()> {
    tracing::debug!(users = users.len(), "syncing officer users");

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "DELETE FROM users WHERE role = ?1",
          rusqlite::params![OFFICER_ROLE],
        )?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO users (username, officer_name, role, password, territory_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
          )?;
          // Non-officer entries are skipped, never inserted.
          for u in users.iter().filter(|u| u.role == OFFICER_ROLE) {
            stmt.execute(rusqlite::params![
              u.username,
              u.officer_name,
              u.role,
              u.password,
              u.territory_id,
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn sync_vehicle_performance(&self, records: Vec<VehiclePerf>) -> Result<()> {
    tracing::debug!(records = records.len(), "replacing vehicle performance");

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM vehicle_performance", [])?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO vehicle_performance (
               customer_id, customer_name, model, km1, km2, earning,
               overdue_no, overdue_amt, extra1, extra2
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          )?;
          for v in &records {
            stmt.execute(rusqlite::params![
              v.customer_id,
              v.customer_name,
              v.model,
              v.km1,
              v.km2,
              v.earning,
              v.overdue_no,
              v.overdue_amt,
              v.extra1,
              v.extra2,
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Admin unlocks ─────────────────────────────────────────────────────────

  async fn set_unlock(&self, territory_id: String, unlock_until: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO admin_unlocks (territory_id, unlock_until)
           VALUES (?1, ?2)
           ON CONFLICT (territory_id) DO UPDATE SET
             unlock_until = excluded.unlock_until",
          rusqlite::params![territory_id, unlock_until],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
