//! Expense record: entity, category enum and the validation contract every
//! storage backend applies before a row is written.

use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, EntityTrait, Iterable, QueryFilter, QueryOrder, Set};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors;

/// Fixed set of spending categories. Stored as its string value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum Category {
    #[sea_orm(string_value = "Food")]
    Food,
    #[sea_orm(string_value = "Transport")]
    Transport,
    #[sea_orm(string_value = "Utilities")]
    Utilities,
    #[sea_orm(string_value = "Entertainment")]
    Entertainment,
    #[sea_orm(string_value = "Other")]
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Utilities => "Utilities",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }

    /// Exact, case-sensitive match against the allowed values.
    pub fn parse(raw: &str) -> Result<Self, errors::ModelError> {
        Category::iter()
            .find(|c| c.as_str() == raw)
            .ok_or_else(|| {
                errors::ModelError::Validation(format!("`{raw}` is not a valid value for category"))
            })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expense")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub category: Category,
    pub date: DateTimeWithTimeZone,
    pub owner_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Amount as it arrives from a client: a JSON number or a numeric string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountField {
    Number(f64),
    Text(String),
}

impl AmountField {
    /// An empty or whitespace-only string counts as "not supplied".
    pub fn is_blank(&self) -> bool {
        matches!(self, AmountField::Text(s) if s.trim().is_empty())
    }

    pub fn cast(&self) -> Result<f64, errors::ModelError> {
        let value = match self {
            AmountField::Number(n) => Some(*n),
            AmountField::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value.filter(|n| n.is_finite()).ok_or_else(|| {
            errors::ModelError::Validation(format!("cast to number failed for amount {:?}", self))
        })
    }
}

impl From<f64> for AmountField {
    fn from(n: f64) -> Self { AmountField::Number(n) }
}

/// Fields for a new row. `category` stays raw so that the enum check happens here, not in callers.
#[derive(Clone, Debug)]
pub struct NewExpense {
    pub owner_id: Uuid,
    pub description: String,
    pub amount: AmountField,
    pub category: String,
    pub date: Option<DateTime<Utc>>,
}

pub fn validate_description(d: &str) -> Result<(), errors::ModelError> {
    if d.trim().is_empty() {
        return Err(errors::ModelError::Validation("description required".into()));
    }
    Ok(())
}

pub fn parse_id(raw: &str) -> Result<Uuid, errors::ModelError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| errors::ModelError::Validation(format!("cast to uuid failed for id `{raw}`")))
}

/// Validate and cast `new`, assigning id and timestamps. `date` defaults to now.
pub fn prepare(new: NewExpense) -> Result<Model, errors::ModelError> {
    validate_description(&new.description)?;
    let amount = new.amount.cast()?;
    let category = Category::parse(&new.category)?;

    let now: DateTimeWithTimeZone = Utc::now().into();
    Ok(Model {
        id: Uuid::new_v4(),
        description: new.description,
        amount,
        category,
        date: new.date.map(Into::into).unwrap_or(now),
        owner_id: new.owner_id,
        created_at: now,
        updated_at: now,
    })
}

/// Newest `date` first; rows sharing a date fall back to newest `created_at`.
pub fn sort_newest_first(rows: &mut [Model]) {
    rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.created_at.cmp(&a.created_at)));
}

pub async fn insert(db: &DatabaseConnection, new: NewExpense) -> Result<Model, errors::ModelError> {
    let m = prepare(new)?;
    let am = ActiveModel {
        id: Set(m.id),
        description: Set(m.description),
        amount: Set(m.amount),
        category: Set(m.category),
        date: Set(m.date),
        owner_id: Set(m.owner_id),
        created_at: Set(m.created_at),
        updated_at: Set(m.updated_at),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_owner(db: &DatabaseConnection, owner_id: Uuid) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::OwnerId.eq(owner_id))
        .order_by_desc(Column::Date)
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}
