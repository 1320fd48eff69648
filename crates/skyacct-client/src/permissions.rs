//! Permissions.

use chrono::Utc;
use skyacct_core::{
  Result,
  path::segment,
  permission::{NewPermission, Permission},
  transport::{Expect, Transport},
  validate::{Validate, require_id},
};
use uuid::Uuid;

use crate::{
  ApiClient,
  exchange::{Call, unexpected},
};

pub struct Permissions<'a, T> {
  api: &'a ApiClient<T>,
}

impl<'a, T: Transport> Permissions<'a, T> {
  pub(crate) fn new(api: &'a ApiClient<T>) -> Self { Self { api } }

  pub async fn create(&self, input: &NewPermission) -> Result<Permission> {
    input.validate(Utc::now())?;
    self
      .api
      .fetch(Call::post("/permissions").json(input)?.expect(Expect::CREATED))
      .await
  }

  pub async fn get(&self, id: Uuid) -> Result<Permission> {
    self.api.fetch(Call::get(format!("/permissions/{id}"))).await
  }

  /// `GET /permissions/by-name/{name}`
  pub async fn get_by_name(&self, name: &str) -> Result<Permission> {
    let path = format!("/permissions/by-name/{}", segment(name));
    self.api.fetch(Call::get(path)).await
  }

  /// `PUT /permissions/{id}`
  pub async fn update(&self, permission: &Permission) -> Result<()> {
    permission.validate(Utc::now())?;
    let path = format!("/permissions/{}", permission.id);
    self.api.execute(Call::put(path).json(permission)?).await
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    require_id(id, "permission_id")?;
    self.api.execute(Call::delete(format!("/permissions/{id}"))).await
  }

  pub async fn list(&self) -> Result<Vec<Permission>> {
    self.api.fetch(Call::get("/permissions")).await
  }

  /// `200` is `true`, `404` is `false`; anything else is an error.
  pub async fn exists(&self, id: Uuid) -> Result<bool> {
    let call = Call::get(format!("/permissions/{id}"));
    let response = self.api.send_raw(&call).await?;
    match response.status {
      200 => Ok(true),
      404 => Ok(false),
      _ => Err(unexpected(&response)),
    }
  }

  pub async fn by_user(&self, user_id: Uuid) -> Result<Vec<Permission>> {
    self
      .api
      .fetch(Call::get(format!("/users/{user_id}/permissions")))
      .await
  }

  pub async fn by_role(&self, role_id: Uuid) -> Result<Vec<Permission>> {
    self
      .api
      .fetch(Call::get(format!("/roles/{role_id}/permissions")))
      .await
  }
}
