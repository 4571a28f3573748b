//! 反馈答案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "feedback_answers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub response_id: i64,
    /// 不设外键，题目被替换后仍保留历史答案
    pub question_id: i64,
    #[sea_orm(column_type = "Text")]
    pub answer_text: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::feedback_responses::Entity",
        from = "Column::ResponseId",
        to = "super::feedback_responses::Column::Id",
        on_delete = "Cascade"
    )]
    FeedbackResponse,
}

impl Related<super::feedback_responses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeedbackResponse.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
