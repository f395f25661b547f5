//! Scripted client for unit tests: replays queued responses and records calls.
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::{
    BaseType, Client, Config, Direction, ElementId, PropertyData, Registry, Response, Result,
    SharedClient,
};

pub(crate) struct StubClient {
    config: Config,
    registry: Registry,
    responses: Mutex<VecDeque<Result<Response>>>,
    calls: Mutex<Vec<&'static str>>,
    last_payload: Mutex<Option<Value>>,
}

impl StubClient {
    pub(crate) fn new() -> Self {
        Self {
            config: Config::new("http://localhost/graphs/g"),
            registry: Registry::new(),
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            last_payload: Mutex::new(None),
        }
    }

    pub(crate) fn shared() -> SharedClient {
        Arc::new(Self::new())
    }

    pub(crate) fn push(&self, response: Result<Response>) {
        self.responses.lock().push_back(response);
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    pub(crate) fn last_payload(&self) -> Option<Value> {
        self.last_payload.lock().clone()
    }

    fn reply(&self, call: &'static str, payload: Option<Value>) -> Result<Response> {
        self.calls.lock().push(call);
        if payload.is_some() {
            *self.last_payload.lock() = payload;
        }
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(Response::empty()))
    }
}

impl Client for StubClient {
    fn config(&self) -> &Config {
        &self.config
    }

    fn registry(&self) -> &Registry {
        &self.registry
    }

    fn create_vertex(&self, data: &PropertyData) -> Result<Response> {
        self.reply("create_vertex", Some(data.clone().into_value()))
    }

    fn get_vertex(&self, _id: &ElementId) -> Result<Response> {
        self.reply("get_vertex", None)
    }

    fn get_all_vertices(&self) -> Result<Response> {
        self.reply("get_all_vertices", None)
    }

    fn update_vertex(&self, _id: &ElementId, data: &PropertyData) -> Result<Response> {
        self.reply("update_vertex", Some(data.clone().into_value()))
    }

    fn remove_vertex_properties(&self, _id: &ElementId) -> Result<Response> {
        self.reply("remove_vertex_properties", None)
    }

    fn delete_vertex(&self, _id: &ElementId) -> Result<Response> {
        self.reply("delete_vertex", None)
    }

    fn create_edge(
        &self,
        out_v: &ElementId,
        label: &str,
        in_v: &ElementId,
        data: &PropertyData,
    ) -> Result<Response> {
        let mut payload = data.clone().into_map();
        payload.insert("_outV".to_string(), out_v.to_json());
        payload.insert("_label".to_string(), Value::from(label));
        payload.insert("_inV".to_string(), in_v.to_json());
        self.reply("create_edge", Some(Value::Object(payload)))
    }

    fn get_edge(&self, _id: &ElementId) -> Result<Response> {
        self.reply("get_edge", None)
    }

    fn get_all_edges(&self) -> Result<Response> {
        self.reply("get_all_edges", None)
    }

    fn update_edge(&self, _id: &ElementId, data: &PropertyData) -> Result<Response> {
        self.reply("update_edge", Some(data.clone().into_value()))
    }

    fn remove_edge_properties(&self, _id: &ElementId) -> Result<Response> {
        self.reply("remove_edge_properties", None)
    }

    fn delete_edge(&self, _id: &ElementId) -> Result<Response> {
        self.reply("delete_edge", None)
    }

    fn adjacent(
        &self,
        _id: &ElementId,
        _direction: Direction,
        _target: BaseType,
        _label: Option<&str>,
    ) -> Result<Response> {
        self.reply("adjacent", None)
    }
}
