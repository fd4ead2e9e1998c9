use crate::{BoxError, connection::Connection};
use demo_proto::HelloServiceClient;
use demo_proto::pb::hello::{HelloReply, HelloRequest};
use http_body::Body as HttpBody;
use tonic::{Status, client::GrpcService, transport::Channel};

#[derive(Debug, Clone)]
pub struct HelloStub<S = Channel> {
    client: HelloServiceClient<S>,
}

impl HelloStub<Channel> {
    pub fn from_connection(connection: &Connection) -> Self {
        Self::new(connection.channel())
    }
}

impl<S> HelloStub<S>
where
    S: GrpcService<tonic::body::Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    pub fn new(service: S) -> Self {
        Self {
            client: HelloServiceClient::new(service),
        }
    }

    /// `hello.HelloService/TickInfo`
    pub async fn tick_info(&mut self, request: HelloRequest) -> Result<HelloReply, Status> {
        let response = self.client.tick_info(request).await?;
        Ok(response.into_inner())
    }
}
