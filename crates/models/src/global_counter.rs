//! Singleton counter row and its increment operation.
//!
//! The table holds at most one row, addressed by [`SINGLETON_ID`]. The row is
//! created on the first increment and updated in place afterwards.

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ConnectionTrait, DatabaseTransaction, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ModelError;

/// Fixed key of the only counter row.
pub const SINGLETON_ID: i32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "global_counter")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub value: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert the counter row with value 0 unless it already exists.
///
/// Uses `ON CONFLICT (id) DO NOTHING`, so two transactions racing on an empty
/// table end up with one row; the loser waits for the winner's insert to
/// settle instead of failing.
pub async fn ensure_row<C: ConnectionTrait>(conn: &C) -> Result<(), ModelError> {
    let am = ActiveModel { id: Set(SINGLETON_ID), value: Set(0) };
    let inserted = Entity::insert(am)
        .on_conflict(OnConflict::column(Column::Id).do_nothing().to_owned())
        .exec_without_returning(conn)
        .await?;
    if inserted > 0 {
        debug!("counter row created");
    }
    Ok(())
}

/// Increment the counter by one and commit `txn`.
///
/// The update is evaluated by the database (`value = value + 1`) and holds
/// the row lock until commit, so concurrent callers never observe the same
/// base value. The returned value is read back from the store inside the
/// same transaction, after the update and before the commit.
///
/// Any error drops `txn` without committing, which rolls it back.
pub async fn increment(txn: DatabaseTransaction) -> Result<i32, ModelError> {
    if Entity::find_by_id(SINGLETON_ID).one(&txn).await?.is_none() {
        ensure_row(&txn).await?;
    }

    let res = Entity::update_many()
        .col_expr(Column::Value, Expr::col(Column::Value).add(1))
        .filter(Column::Id.eq(SINGLETON_ID))
        .exec(&txn)
        .await?;
    if res.rows_affected != 1 {
        return Err(ModelError::Inconsistent(format!(
            "expected 1 counter row updated, got {}",
            res.rows_affected
        )));
    }

    let value = Entity::find_by_id(SINGLETON_ID)
        .one(&txn)
        .await?
        .map(|m| m.value)
        .ok_or_else(|| ModelError::Inconsistent("counter row missing after update".into()))?;

    txn.commit().await?;
    Ok(value)
}

/// Open a transaction on `db` and run [`increment`] in it.
pub async fn increment_in<C: TransactionTrait>(db: &C) -> Result<i32, ModelError> {
    let txn = db.begin().await?;
    increment(txn).await
}

/// Current value; 0 when the row has not been created yet.
pub async fn current<C: ConnectionTrait>(conn: &C) -> Result<i32, ModelError> {
    let row = Entity::find_by_id(SINGLETON_ID).one(conn).await?;
    Ok(row.map(|m| m.value).unwrap_or(0))
}
