use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 每个活动只允许一份反馈表 ====================
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_feedback_forms_event_id")
                    .table(FeedbackForms::Table)
                    .col(FeedbackForms::EventId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ==================== 每个学生对同一表单只能提交一次 ====================
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_feedback_responses_form_student_event")
                    .table(FeedbackResponses::Table)
                    .col(FeedbackResponses::FormId)
                    .col(FeedbackResponses::StudentId)
                    .col(FeedbackResponses::EventId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 提交状态查询走 (event_id, student_id)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_feedback_responses_event_student")
                    .table(FeedbackResponses::Table)
                    .col(FeedbackResponses::EventId)
                    .col(FeedbackResponses::StudentId)
                    .to_owned(),
            )
            .await?;

        // ==================== 一次提交中每道题只有一个答案 ====================
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_feedback_answers_response_question")
                    .table(FeedbackAnswers::Table)
                    .col(FeedbackAnswers::ResponseId)
                    .col(FeedbackAnswers::QuestionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("uq_feedback_answers_response_question")
                    .table(FeedbackAnswers::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_feedback_responses_event_student")
                    .table(FeedbackResponses::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("uq_feedback_responses_form_student_event")
                    .table(FeedbackResponses::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("uq_feedback_forms_event_id")
                    .table(FeedbackForms::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum FeedbackForms {
    #[sea_orm(iden = "feedback_forms")]
    Table,
    EventId,
}

#[derive(DeriveIden)]
enum FeedbackResponses {
    #[sea_orm(iden = "feedback_responses")]
    Table,
    FormId,
    EventId,
    StudentId,
}

#[derive(DeriveIden)]
enum FeedbackAnswers {
    #[sea_orm(iden = "feedback_answers")]
    Table,
    ResponseId,
    QuestionId,
}
