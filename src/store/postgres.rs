use postgres::types::ToSql;
use postgres::NoTls;
use r2d2_postgres::PostgresConnectionManager;

use super::{Row, Store, StoreError};

/// PostgreSQL-backed store.
///
/// Connections live in an r2d2 pool; every query checks one out for its
/// duration and returns it on drop, so concurrent workers never share a
/// handle. Parameters cross the [`Store`] boundary as text; the SQL in
/// the handlers carries `::text::...` casts where a column is not
/// text-typed.
pub struct PgStore {
    pool: r2d2::Pool<PostgresConnectionManager<NoTls>>,
}

impl PgStore {
    /// Connects to the database described by `database_url` (URL or
    /// `key=value` conninfo form) and fills a pool of `pool_size`
    /// connections.
    pub fn connect(database_url: &str, pool_size: u32) -> Result<Self, StoreError> {
        let config: postgres::Config = database_url.parse()?;
        let manager = PostgresConnectionManager::new(config, NoTls);
        let pool = r2d2::Pool::builder().max_size(pool_size).build(manager)?;

        Ok(Self { pool })
    }
}

impl Store for PgStore {
    fn query(&self, sql: &str, params: &[Option<&str>]) -> Result<Vec<Row>, StoreError> {
        let mut client = self.pool.get()?;

        let args: Vec<&(dyn ToSql + Sync)> = params
            .iter()
            .map(|param| param as &(dyn ToSql + Sync))
            .collect();

        let rows = client.query(sql, &args)?;

        let mut out = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut cells: Row = Vec::with_capacity(row.len());
            for i in 0..row.len() {
                cells.push(row.try_get(i)?);
            }
            out.push(cells);
        }

        Ok(out)
    }
}
