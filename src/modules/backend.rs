//! Resolver-side access to the backend functions.

use async_graphql::{Context, ErrorExtensions, Result, ID};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Map, Value};
use shelf_invoker::Invoker;
use shelf_kernel::RequestContext;

use crate::{error::GatewayError, utils};

/// Backend answer to a create call. The id may be a string or a number.
///
/// Objects returned by lookups and lists must carry string ids: their `ID`
/// fields do not accept JSON numbers.
#[derive(Debug, Deserialize)]
struct Created {
    id: Value,
}

/// Invoker bound to the caller of the current request.
pub(crate) struct Backend<'a> {
    invoker: &'a Invoker,
    caller_id: Option<&'a str>,
}

impl<'a> Backend<'a> {
    /// Calls on behalf of the authenticated caller, if any.
    pub fn of(ctx: &Context<'a>) -> Result<Self> {
        let invoker = ctx.data::<Invoker>()?;
        let caller_id = ctx
            .data_opt::<RequestContext>()
            .and_then(|context| context.caller_id.as_deref());

        Ok(Self { invoker, caller_id })
    }

    /// Calls that never carry a caller identity.
    pub fn anonymous(ctx: &Context<'a>) -> Result<Self> {
        Ok(Self {
            caller_id: None,
            ..Self::of(ctx)?
        })
    }

    pub async fn call<T>(&self, target: &'static str, payload: impl Serialize) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let payload = encode(target, payload)?;
        let value = self.dispatch(target, Some(payload)).await?;
        decode(target, value)
    }

    /// Call a function that takes no payload.
    pub async fn call_empty<T>(&self, target: &'static str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let value = self.dispatch(target, None).await?;
        decode(target, value)
    }

    /// Create an object and answer with the caller's input plus the new id.
    ///
    /// The input is sent as `{ <key>: input }`; the backend replies `{id}`.
    pub async fn create<I, O>(&self, target: &'static str, key: &'static str, input: &I) -> Result<O>
    where
        I: Serialize + Sync,
        O: DeserializeOwned,
    {
        let mut payload = Map::new();
        payload.insert(key.to_string(), encode(target, input)?);

        let response = self.dispatch(target, Some(Value::Object(payload))).await?;
        let created: Created = decode(target, response)?;

        utils::merge_created(input, created.id).map_err(|err| {
            GatewayError::remote_call_failed(target, format!("failed to shape created object: {err}"))
                .extend()
        })
    }

    /// Look up one object by id; an empty answer is a not-found error.
    pub async fn fetch_one<T>(&self, kind: &'static str, target: &'static str, id: &ID) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let value = self.dispatch(target, Some(json!({ "id": id }))).await?;

        if utils::is_empty_result(&value) {
            let err = GatewayError::not_found(kind, id.as_str(), self.caller_id);
            tracing::warn!(function = target, error = %err, "lookup returned nothing");
            return Err(err.extend());
        }

        decode(target, value)
    }

    async fn dispatch(&self, target: &'static str, payload: Option<Value>) -> Result<Value> {
        self.invoker
            .invoke(target, self.caller_id, payload)
            .await
            .map_err(|err| GatewayError::from(err).extend())
    }
}

fn encode(target: &str, payload: impl Serialize) -> Result<Value> {
    serde_json::to_value(payload).map_err(|err| {
        GatewayError::remote_call_failed(target, format!("failed to encode payload: {err}")).extend()
    })
}

fn decode<T: DeserializeOwned>(target: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|err| {
        tracing::error!(function = target, error = %err, "unexpected response shape");
        GatewayError::remote_call_failed(target, format!("malformed response: {err}")).extend()
    })
}
