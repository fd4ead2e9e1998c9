#![allow(dead_code)]

use demo_proto::pb::common::Empty;
use demo_proto::pb::demo::{CheckIps, CheckResult, ContactInfo, contact_info::Contact};
use demo_proto::pb::hello::{HelloReply, HelloRequest};
use demo_proto::pb::sample::{Location, LocationSummary};
use demo_proto::{
    DemoService, DemoServiceServer, HelloService, HelloServiceServer, Position, PositionServer,
};
use std::net::SocketAddr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_stream::{StreamExt, wrappers::ReceiverStream};
use tonic::{Request, Response, Status, Streaming, transport::Server};

pub struct HelloServiceImpl;

#[tonic::async_trait]
impl HelloService for HelloServiceImpl {
    async fn tick_info(
        &self,
        request: Request<HelloRequest>,
    ) -> Result<Response<HelloReply>, Status> {
        let req = request.into_inner();
        let receive_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis().to_string())
            .unwrap_or_default();

        Ok(Response::new(HelloReply {
            info: format!("hello {}, age {}, adult {}", req.name, req.age, req.is_adult),
            receive_time,
        }))
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ContactMode {
    Tel,
    Cell,
    Unset,
}

pub struct DemoServiceImpl {
    pub contact: ContactMode,
}

#[tonic::async_trait]
impl DemoService for DemoServiceImpl {
    async fn check_if_black(
        &self,
        request: Request<CheckIps>,
    ) -> Result<Response<CheckResult>, Status> {
        // Anything in 10.0.0.0/8 is on the blacklist.
        let results = request
            .into_inner()
            .ips
            .into_iter()
            .map(|ip| {
                let is_black = ip.starts_with("10.");
                (ip, is_black)
            })
            .collect();

        Ok(Response::new(CheckResult { results }))
    }

    async fn get_contact_info(
        &self,
        _request: Request<Empty>,
    ) -> Result<Response<ContactInfo>, Status> {
        let contact = match self.contact {
            ContactMode::Tel => Some(Contact::Tel("010-88886666".to_string())),
            ContactMode::Cell => Some(Contact::Cell("13800138000".to_string())),
            ContactMode::Unset => None,
        };

        Ok(Response::new(ContactInfo { contact }))
    }
}

pub struct PositionServiceImpl {
    /// Locations streamed back by `PullLocation`.
    pub feed: Vec<Location>,
    /// Inject an `Unavailable` status after this many streamed locations.
    pub fail_pull_after: Option<usize>,
    /// Answer `PostLocation` with `InvalidArgument` as soon as the first location arrives.
    pub reject_uploads: bool,
}

impl Default for PositionServiceImpl {
    fn default() -> Self {
        Self {
            feed: vec![
                Location { lat: 11.323, lon: 92.24 },
                Location { lat: 39.9, lon: 116.4 },
                Location { lat: -33.86, lon: 151.2 },
            ],
            fail_pull_after: None,
            reject_uploads: false,
        }
    }
}

#[tonic::async_trait]
impl Position for PositionServiceImpl {
    type PullLocationStream = ReceiverStream<Result<Location, Status>>;

    async fn post_location(
        &self,
        request: Request<Streaming<Location>>,
    ) -> Result<Response<LocationSummary>, Status> {
        let mut stream = request.into_inner();
        let mut received = 0;

        while let Some(location) = stream.next().await {
            let location = location?;
            if self.reject_uploads {
                return Err(Status::invalid_argument(format!(
                    "location {},{} rejected",
                    location.lat, location.lon
                )));
            }
            received += 1;
        }

        Ok(Response::new(LocationSummary { received }))
    }

    async fn pull_location(
        &self,
        _request: Request<Empty>,
    ) -> Result<Response<Self::PullLocationStream>, Status> {
        let feed = self.feed.clone();
        let fail_after = self.fail_pull_after;
        let (tx, rx) = mpsc::channel(4);

        tokio::spawn(async move {
            for (i, location) in feed.into_iter().enumerate() {
                if fail_after == Some(i) {
                    tx.send(Err(Status::unavailable("position feed lost")))
                        .await
                        .ok();
                    return;
                }
                tx.send(Ok(location)).await.ok();
            }
        });

        Ok(Response::new(ReceiverStream::new(rx)))
    }
}

pub struct FakeServices {
    pub demo: DemoServiceImpl,
    pub position: PositionServiceImpl,
}

impl Default for FakeServices {
    fn default() -> Self {
        Self {
            demo: DemoServiceImpl {
                contact: ContactMode::Tel,
            },
            position: PositionServiceImpl::default(),
        }
    }
}

/// A server running in the background, stoppable on demand.
pub struct RunningServer {
    pub addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl RunningServer {
    /// Stops accepting calls and waits until the server is gone.
    ///
    /// Connections still draining after a few seconds are cut.
    pub async fn stop(self) {
        self.shutdown.send(()).ok();

        let abort = self.handle.abort_handle();
        if tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .is_err()
        {
            abort.abort();
        }
    }
}

/// Serves the three fake services on an ephemeral local port.
pub async fn spawn_server(services: FakeServices) -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    serve_on(listener, services)
}

pub fn serve_on(listener: TcpListener, services: FakeServices) -> RunningServer {
    let addr = listener.local_addr().unwrap();
    let (shutdown, signal) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        Server::builder()
            .add_service(HelloServiceServer::new(HelloServiceImpl))
            .add_service(DemoServiceServer::new(services.demo))
            .add_service(PositionServer::new(services.position))
            .serve_with_incoming_shutdown(
                tokio_stream::wrappers::TcpListenerStream::new(listener),
                async {
                    signal.await.ok();
                },
            )
            .await
            .unwrap();
    });

    RunningServer {
        addr,
        shutdown,
        handle,
    }
}

/// An address nothing listens on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
