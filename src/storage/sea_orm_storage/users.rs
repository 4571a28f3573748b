//! 用户只读查询（提交者信息）

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::users::{Column, Entity as Users};
use crate::errors::{FeedbackError, Result};
use crate::models::users::entities::UserContact;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

impl SeaOrmStorage {
    /// 批量获取用户联系信息
    pub async fn get_user_contacts_impl(&self, ids: &[i64]) -> Result<HashMap<i64, UserContact>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = Users::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| FeedbackError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(users
            .into_iter()
            .map(|u| (u.id, u.into_contact()))
            .collect())
    }
}
