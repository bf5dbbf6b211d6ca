//! The remote resource seam.
//!
//! A [`Remote`] is the list/create/update/delete contract of a REST resource
//! under `/api/<resource>`. The HTTP implementation lives in the `api` crate;
//! [`crate::MemoryRemote`] backs tests.

use std::future::Future;

use crate::entity::{Entity, EntityId};
use crate::error::ResourceError;

pub trait Remote<E: Entity> {
    /// `GET /api/<resource>`
    fn list(&self) -> impl Future<Output = Result<Vec<E>, ResourceError>>;

    /// `POST /api/<resource>`; the response carries the server-assigned id.
    fn create(&self, draft: &E::Draft) -> impl Future<Output = Result<E, ResourceError>>;

    /// `PUT /api/<resource>/{id}`. `None` when the server answered without
    /// a usable entity body.
    fn update(
        &self,
        id: &EntityId,
        draft: &E::Draft,
    ) -> impl Future<Output = Result<Option<E>, ResourceError>>;

    /// `DELETE /api/<resource>/{id}`
    fn delete(&self, id: &EntityId) -> impl Future<Output = Result<(), ResourceError>>;
}
