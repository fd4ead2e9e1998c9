use crate::{BoxError, connection::Connection};
use demo_proto::DemoServiceClient;
use demo_proto::pb::common::Empty;
use demo_proto::pb::demo::{CheckIps, CheckResult, ContactInfo};
use http_body::Body as HttpBody;
use tonic::{Status, client::GrpcService, transport::Channel};

#[derive(Debug, Clone)]
pub struct DemoStub<S = Channel> {
    client: DemoServiceClient<S>,
}

impl DemoStub<Channel> {
    pub fn from_connection(connection: &Connection) -> Self {
        Self::new(connection.channel())
    }
}

impl<S> DemoStub<S>
where
    S: GrpcService<tonic::body::Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    pub fn new(service: S) -> Self {
        Self {
            client: DemoServiceClient::new(service),
        }
    }

    /// `demo.DemoService/CheckIfBlack`
    ///
    /// The reply maps every checked IP to whether it is blacklisted.
    pub async fn check_if_black(&mut self, request: CheckIps) -> Result<CheckResult, Status> {
        let response = self.client.check_if_black(request).await?;
        Ok(response.into_inner())
    }

    /// `demo.DemoService/GetContactInfo`
    pub async fn get_contact_info(&mut self) -> Result<ContactInfo, Status> {
        let response = self.client.get_contact_info(Empty {}).await?;
        Ok(response.into_inner())
    }
}
