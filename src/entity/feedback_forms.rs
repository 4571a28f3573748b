//! 反馈表单实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "feedback_forms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub event_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::feedback_questions::Entity")]
    FeedbackQuestions,
    #[sea_orm(has_many = "super::feedback_responses::Entity")]
    FeedbackResponses,
}

impl Related<super::feedback_questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeedbackQuestions.def()
    }
}

impl Related<super::feedback_responses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeedbackResponses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_feedback_form(
        self,
        questions: Vec<crate::models::feedback_forms::entities::FeedbackQuestion>,
    ) -> crate::models::feedback_forms::entities::FeedbackForm {
        use chrono::{DateTime, Utc};

        crate::models::feedback_forms::entities::FeedbackForm {
            id: self.id,
            event_id: self.event_id,
            title: self.title,
            description: self.description,
            created_by: self.created_by,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
            questions,
        }
    }
}
