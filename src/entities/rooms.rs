use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: String,
    #[sea_orm(column_name = "type")]
    pub room_type: String,
    pub capacity: String,
    pub price_per_hour: f64,
    /// JSON array of amenity tags, in display order.
    pub amenities: String,
    /// JSON array of image URIs, in display order.
    pub images: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
