use chrono::{DateTime, Utc};
use contracts::enums::language::Language;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_translations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub language: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub value: String,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Row to write, independent of the sea-orm active model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRow {
    pub language: Language,
    pub key: String,
    pub value: String,
}

impl TranslationRow {
    fn into_active(self, updated_at: DateTime<Utc>) -> ActiveModel {
        ActiveModel {
            language: Set(self.language.code().to_string()),
            key: Set(self.key),
            value: Set(self.value),
            updated_at: Set(Some(updated_at)),
        }
    }
}

pub async fn list_all<C: ConnectionTrait>(conn: &C) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .order_by_asc(Column::Language)
        .order_by_asc(Column::Key)
        .all(conn)
        .await
}

pub async fn list_by_language<C: ConnectionTrait>(
    conn: &C,
    language: Language,
) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .filter(Column::Language.eq(language.code()))
        .order_by_asc(Column::Key)
        .all(conn)
        .await
}

pub async fn count<C: ConnectionTrait>(conn: &C) -> Result<u64, DbErr> {
    Entity::find().count(conn).await
}

/// Insert or overwrite one value. Last write wins.
pub async fn upsert<C: ConnectionTrait>(
    conn: &C,
    row: TranslationRow,
    updated_at: DateTime<Utc>,
) -> Result<(), DbErr> {
    Entity::insert(row.into_active(updated_at))
        .on_conflict(
            OnConflict::columns([Column::Language, Column::Key])
                .update_columns([Column::Value, Column::UpdatedAt])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

pub async fn insert_many<C: ConnectionTrait>(
    conn: &C,
    rows: Vec<TranslationRow>,
    updated_at: DateTime<Utc>,
) -> Result<u64, DbErr> {
    if rows.is_empty() {
        return Ok(0);
    }
    let models: Vec<ActiveModel> = rows
        .into_iter()
        .map(|row| row.into_active(updated_at))
        .collect();
    Entity::insert_many(models)
        .exec_without_returning(conn)
        .await
}

pub async fn delete_all<C: ConnectionTrait>(conn: &C) -> Result<u64, DbErr> {
    let result = Entity::delete_many().exec(conn).await?;
    Ok(result.rows_affected)
}
