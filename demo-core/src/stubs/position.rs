//! Stub for `sample.Position`, plus the handles of its two streaming calls.
use crate::{BoxError, connection::Connection};
use demo_proto::PositionClient;
use demo_proto::pb::common::Empty;
use demo_proto::pb::sample::{Location, LocationSummary};
use http_body::Body as HttpBody;
use tokio::{
    sync::mpsc,
    task::{JoinError, JoinHandle},
};
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Status, Streaming, client::GrpcService, transport::Channel};

/// Messages buffered between [`LocationUpload::send`] and the transport.
const UPLOAD_BUFFER: usize = 16;

/// Errors of the client-streaming upload.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("The upload stream was closed after {sent} message(s)")]
    Closed { sent: usize },
    #[error(transparent)]
    Status(#[from] Status),
    #[error("The upload task did not complete: {0}")]
    Task(#[from] JoinError),
}

#[derive(Debug, Clone)]
pub struct PositionStub<S = Channel> {
    client: PositionClient<S>,
}

impl PositionStub<Channel> {
    pub fn from_connection(connection: &Connection) -> Self {
        Self::new(connection.channel())
    }
}

impl<S> PositionStub<S>
where
    S: GrpcService<tonic::body::Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    pub fn new(service: S) -> Self {
        Self {
            client: PositionClient::new(service),
        }
    }

    /// `sample.Position/PullLocation`
    ///
    /// Opens the server stream. Messages are read with [`LocationDownload::recv`].
    pub async fn pull_location(&mut self) -> Result<LocationDownload, Status> {
        let response = self.client.pull_location(Empty {}).await?;
        Ok(LocationDownload {
            stream: response.into_inner(),
        })
    }
}

impl<S> PositionStub<S>
where
    S: GrpcService<tonic::body::Body> + Clone + Send + 'static,
    S::Future: Send,
    S::Error: Into<BoxError> + Send,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    /// `sample.Position/PostLocation`
    ///
    /// Starts the client stream on a background task. Messages sent through the returned
    /// handle reach the server in order; the summary is read with
    /// [`LocationUpload::close_and_receive`].
    pub fn post_location(&mut self) -> LocationUpload {
        let (sender, receiver) = mpsc::channel(UPLOAD_BUFFER);
        let mut client = self.client.clone();

        let task = tokio::spawn(async move {
            let response = client.post_location(ReceiverStream::new(receiver)).await?;
            Ok::<_, Status>(response.into_inner())
        });

        LocationUpload::new(sender, task)
    }
}

/// Sending half of an in-flight `PostLocation` call.
///
/// Dropping the handle without closing it cancels the call.
#[derive(Debug)]
pub struct LocationUpload {
    sender: Option<mpsc::Sender<Location>>,
    task: Option<JoinHandle<Result<LocationSummary, Status>>>,
    sent: usize,
}

impl LocationUpload {
    fn new(
        sender: mpsc::Sender<Location>,
        task: JoinHandle<Result<LocationSummary, Status>>,
    ) -> Self {
        Self {
            sender: Some(sender),
            task: Some(task),
            sent: 0,
        }
    }

    /// Number of messages handed to the stream so far.
    pub fn sent(&self) -> usize {
        self.sent
    }

    /// Queues one message on the stream.
    ///
    /// Fails once the call has terminated. If the server ended it with a status, that status is
    /// returned as [`UploadError::Status`]; otherwise the error is [`UploadError::Closed`].
    pub async fn send(&mut self, location: Location) -> Result<(), UploadError> {
        let Some(sender) = self.sender.as_ref() else {
            return Err(UploadError::Closed { sent: self.sent });
        };

        if sender.send(location).await.is_err() {
            return Err(self.terminated().await);
        }

        self.sent += 1;

        Ok(())
    }

    /// Reads the outcome of a call whose request stream is already gone.
    async fn terminated(&mut self) -> UploadError {
        drop(self.sender.take());

        match self.task.take() {
            Some(task) => match task.await {
                Ok(Err(status)) => UploadError::Status(status),
                _ => UploadError::Closed { sent: self.sent },
            },
            None => UploadError::Closed { sent: self.sent },
        }
    }

    /// Ends the stream and waits for the single aggregate reply.
    pub async fn close_and_receive(mut self) -> Result<LocationSummary, UploadError> {
        // Dropping the sender is the end-of-stream marker for the server.
        drop(self.sender.take());

        let Some(task) = self.task.take() else {
            return Err(UploadError::Closed { sent: self.sent });
        };

        Ok(task.await??)
    }
}

impl Drop for LocationUpload {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Receiving half of an in-flight `PullLocation` call.
pub struct LocationDownload {
    stream: Streaming<Location>,
}

impl LocationDownload {
    /// Waits for the next message.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Location))` - The next streamed message.
    /// * `Ok(None)` - End of stream. The server finished normally.
    /// * `Err(Status)` - The stream failed.
    pub async fn recv(&mut self) -> Result<Option<Location>, Status> {
        self.stream.message().await
    }
}
