use async_trait::async_trait;
use iserver_client::domain::results::{FacilityAnalyst3DResult, GetFeaturesResult};
use iserver_client::params::{FacilityAnalystSinks3DParameters, GetFeaturesByBoundsParameters};
use iserver_client::{
    Bounds, ClientError, FeatureService, NetworkAnalyst3DService, Result, ServiceOptions,
    ServiceRequest, Transport,
};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// Answers every request with the same payload and remembers what it was asked.
struct RecordingTransport {
    response: std::result::Result<serde_json::Value, u16>,
    requests: Mutex<Vec<ServiceRequest>>,
}

impl RecordingTransport {
    fn ok(payload: serde_json::Value) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(payload),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            response: Err(status),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ServiceRequest) -> Result<serde_json::Value> {
        self.requests.lock().unwrap().push(request);
        match &self.response {
            Ok(payload) => Ok(payload.clone()),
            Err(status) => Err(ClientError::server(*status, i64::from(*status), "mock failure")),
        }
    }
}

#[tokio::test]
async fn test_callback_receives_result_exactly_once() {
    let transport = RecordingTransport::ok(json!({
        "featureCount": 1,
        "totalCount": 1,
        "features": [{"ID": 3, "fieldNames": ["NAME"], "fieldValues": ["Lake"]}]
    }));
    let service = FeatureService::with_transport(
        "http://localhost:8090/iserver/services/data-world/rest/data",
        ServiceOptions::default(),
        transport.clone(),
    )
    .unwrap();

    let (sender, mut receiver) = mpsc::unbounded_channel::<Result<GetFeaturesResult>>();
    let params = GetFeaturesByBoundsParameters::new(Bounds::new(0.0, 0.0, 10.0, 10.0))
        .with_dataset_names(["Lakes"]);

    service.process_async(params, move |result| {
        sender.send(result).unwrap();
    });

    let result = tokio::time::timeout(Duration::from_secs(5), receiver.recv())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(result.features[0].attribute("NAME"), Some("Lake"));

    // The sender was moved into the callback; the channel closes once it has run.
    assert!(receiver.recv().await.is_none());
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_callback_receives_failure() {
    let transport = RecordingTransport::failing(500);
    let service = NetworkAnalyst3DService::with_transport(
        "http://localhost:8090/iserver/services/networkanalyst3d/rest/RoadNet@Changchun",
        ServiceOptions::default(),
        transport.clone(),
    )
    .unwrap();

    let (sender, mut receiver) = mpsc::unbounded_channel::<Result<FacilityAnalyst3DResult>>();
    service.process_async(FacilityAnalystSinks3DParameters::from_node(1), move |result| {
        sender.send(result).unwrap();
    });

    let outcome = receiver.recv().await.unwrap();
    assert!(matches!(outcome, Err(ClientError::Server { status: 500, .. })));
    assert!(receiver.recv().await.is_none());
}

#[tokio::test]
async fn test_process_async_is_chainable() {
    let transport = RecordingTransport::ok(json!({"edgeIDs": [], "nodeIDs": []}));
    let service = NetworkAnalyst3DService::with_transport(
        "http://localhost:8090/iserver/services/networkanalyst3d/rest/RoadNet@Changchun",
        ServiceOptions::default().with_token("abc"),
        transport.clone(),
    )
    .unwrap();

    let calls = Arc::new(Mutex::new(0));
    let (first, second) = (calls.clone(), calls.clone());
    let (sender, mut receiver) = mpsc::unbounded_channel::<()>();
    let other_sender = sender.clone();

    service
        .process_async(FacilityAnalystSinks3DParameters::from_edge(1), move |_| {
            *first.lock().unwrap() += 1;
            sender.send(()).unwrap();
        })
        .process_async(FacilityAnalystSinks3DParameters::from_edge(2), move |_| {
            *second.lock().unwrap() += 1;
            other_sender.send(()).unwrap();
        });

    receiver.recv().await.unwrap();
    receiver.recv().await.unwrap();
    assert!(receiver.recv().await.is_none());
    assert_eq!(*calls.lock().unwrap(), 2);

    let requests = transport.requests.lock().unwrap();
    assert!(requests
        .iter()
        .all(|request| request.query_value("token").as_deref() == Some("abc")));
}
