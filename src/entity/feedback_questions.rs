//! 反馈题目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "feedback_questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub form_id: i64,
    #[sea_orm(column_type = "Text")]
    pub question_text: String,
    pub question_type: String,
    /// JSON 数组字符串，只有单选题有值
    #[sea_orm(column_type = "Text", nullable)]
    pub options: Option<String>,
    pub is_required: bool,
    pub order_index: i32,
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
}

impl Related<super::feedback_forms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeedbackForm.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_feedback_question(self) -> crate::models::feedback_forms::entities::FeedbackQuestion {
        use crate::models::feedback_forms::entities::{FeedbackQuestion, QuestionType};

        let question_type = self
            .question_type
            .parse::<QuestionType>()
            .unwrap_or_default();
        // 非单选题一律不返回选项
        let options = match question_type {
            QuestionType::MultipleChoice => self
                .options
                .as_deref()
                .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok()),
            _ => None,
        };

        FeedbackQuestion {
            id: self.id,
            form_id: self.form_id,
            question_text: self.question_text,
            question_type,
            options,
            is_required: self.is_required,
            order_index: self.order_index,
        }
    }
}
