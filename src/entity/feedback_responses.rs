//! 反馈提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "feedback_responses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub form_id: i64,
    pub event_id: i64,
    pub student_id: i64,
    pub submitted_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::feedback_forms::Entity",
        from = "Column::FormId",
        to = "super::feedback_forms::Column::Id",
        on_delete = "Cascade"
    )]
    FeedbackForm,
    #[sea_orm(has_many = "super::feedback_answers::Entity")]
    FeedbackAnswers,
}

impl Related<super::feedback_forms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeedbackForm.def()
    }
}

impl Related<super::feedback_answers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeedbackAnswers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
