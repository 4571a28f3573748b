use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 用户表（由身份服务维护，这里只读取姓名和邮箱）
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建反馈表单表
        manager
            .create_table(
                Table::create()
                    .table(FeedbackForms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeedbackForms::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FeedbackForms::EventId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeedbackForms::Title).string().not_null())
                    .col(ColumnDef::new(FeedbackForms::Description).text().not_null())
                    .col(
                        ColumnDef::new(FeedbackForms::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeedbackForms::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeedbackForms::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建反馈题目表
        manager
            .create_table(
                Table::create()
                    .table(FeedbackQuestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeedbackQuestions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FeedbackQuestions::FormId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeedbackQuestions::QuestionText)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeedbackQuestions::QuestionType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeedbackQuestions::Options).text().null())
                    .col(
                        ColumnDef::new(FeedbackQuestions::IsRequired)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(FeedbackQuestions::OrderIndex)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FeedbackQuestions::Table, FeedbackQuestions::FormId)
                            .to(FeedbackForms::Table, FeedbackForms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建反馈提交表
        manager
            .create_table(
                Table::create()
                    .table(FeedbackResponses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeedbackResponses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FeedbackResponses::FormId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeedbackResponses::EventId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeedbackResponses::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeedbackResponses::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FeedbackResponses::Table, FeedbackResponses::FormId)
                            .to(FeedbackForms::Table, FeedbackForms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建反馈答案表
        // question_id 不设外键：替换题目后历史答案仍然保留
        manager
            .create_table(
                Table::create()
                    .table(FeedbackAnswers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeedbackAnswers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FeedbackAnswers::ResponseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeedbackAnswers::QuestionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeedbackAnswers::AnswerText).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(FeedbackAnswers::Table, FeedbackAnswers::ResponseId)
                            .to(FeedbackResponses::Table, FeedbackResponses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_feedback_questions_form_id")
                    .table(FeedbackQuestions::Table)
                    .col(FeedbackQuestions::FormId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_feedback_answers_response_id")
                    .table(FeedbackAnswers::Table)
                    .col(FeedbackAnswers::ResponseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(FeedbackAnswers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FeedbackResponses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FeedbackQuestions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FeedbackForms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Name,
    Email,
    Role,
    CreatedAt,
}

#[derive(DeriveIden)]
enum FeedbackForms {
    #[sea_orm(iden = "feedback_forms")]
    Table,
    Id,
    EventId,
    Title,
    Description,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FeedbackQuestions {
    #[sea_orm(iden = "feedback_questions")]
    Table,
    Id,
    FormId,
    QuestionText,
    QuestionType,
    Options,
    IsRequired,
    OrderIndex,
}

#[derive(DeriveIden)]
enum FeedbackResponses {
    #[sea_orm(iden = "feedback_responses")]
    Table,
    Id,
    FormId,
    EventId,
    StudentId,
    SubmittedAt,
}

#[derive(DeriveIden)]
enum FeedbackAnswers {
    #[sea_orm(iden = "feedback_answers")]
    Table,
    Id,
    ResponseId,
    QuestionId,
    AnswerText,
}
