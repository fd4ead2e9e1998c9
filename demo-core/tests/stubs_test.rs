use demo_core::pb::demo::{CheckIps, contact_info::Contact};
use demo_core::pb::hello::HelloRequest;
use demo_core::pb::sample::Location;
use demo_core::stubs::{DemoStub, HelloStub, PositionStub, UploadError};
use demo_proto::{DemoServiceServer, HelloServiceServer, PositionServer};
use fake_services::{ContactMode, DemoServiceImpl, HelloServiceImpl, PositionServiceImpl};

mod fake_services;

#[tokio::test]
async fn test_tick_info() {
    let mut stub = HelloStub::new(HelloServiceServer::new(HelloServiceImpl));

    let reply = stub
        .tick_info(HelloRequest {
            name: "hewe".to_string(),
            age: 30,
            is_adult: true,
        })
        .await
        .unwrap();

    assert_eq!(reply.info, "hello hewe, age 30, adult true");
    assert!(!reply.receive_time.is_empty());
}

#[tokio::test]
async fn test_check_if_black_maps_every_ip_once() {
    let mut stub = DemoStub::new(DemoServiceServer::new(DemoServiceImpl {
        contact: ContactMode::Tel,
    }));

    let reply = stub
        .check_if_black(CheckIps {
            name: "dup".to_string(),
            ips: vec![
                "10.0.0.1".to_string(),
                "8.8.8.8".to_string(),
                "10.0.0.1".to_string(),
            ],
        })
        .await
        .unwrap();

    assert_eq!(reply.results.len(), 2);
    assert!(reply.results["10.0.0.1"]);
    assert!(!reply.results["8.8.8.8"]);
}

#[tokio::test]
async fn test_get_contact_info_union() {
    let mut tel = DemoStub::new(DemoServiceServer::new(DemoServiceImpl {
        contact: ContactMode::Tel,
    }));
    let mut cell = DemoStub::new(DemoServiceServer::new(DemoServiceImpl {
        contact: ContactMode::Cell,
    }));

    match tel.get_contact_info().await.unwrap().contact {
        Some(Contact::Tel(v)) => assert_eq!(v, "010-88886666"),
        other => panic!("Expected a telephone, got {other:?}"),
    }

    match cell.get_contact_info().await.unwrap().contact {
        Some(Contact::Cell(v)) => assert_eq!(v, "13800138000"),
        other => panic!("Expected a cell number, got {other:?}"),
    }
}

#[tokio::test]
async fn test_post_location() {
    let mut stub = PositionStub::new(PositionServer::new(PositionServiceImpl::default()));

    let mut upload = stub.post_location();
    for i in 0..5 {
        upload
            .send(Location {
                lat: i as f64,
                lon: i as f64,
            })
            .await
            .unwrap();
    }

    assert_eq!(upload.sent(), 5);

    let summary = upload.close_and_receive().await.unwrap();

    assert_eq!(summary.received, 5);
}

#[tokio::test]
async fn test_post_location_rejected() {
    let mut stub = PositionStub::new(PositionServer::new(PositionServiceImpl {
        reject_uploads: true,
        ..Default::default()
    }));

    let mut upload = stub.post_location();
    upload
        .send(Location { lat: 1.0, lon: 2.0 })
        .await
        .unwrap();

    match upload.close_and_receive().await {
        Err(UploadError::Status(status)) => {
            assert_eq!(status.code(), tonic::Code::InvalidArgument)
        }
        other => panic!("Expected a rejected upload, got {other:?}"),
    }
}

#[tokio::test]
async fn test_pull_location_until_end_of_stream() {
    let mut stub = PositionStub::new(PositionServer::new(PositionServiceImpl::default()));

    let mut download = stub.pull_location().await.unwrap();

    let mut received = Vec::new();
    while let Some(location) = download.recv().await.unwrap() {
        received.push(location);
    }

    assert_eq!(received, PositionServiceImpl::default().feed);
}

#[tokio::test]
async fn test_pull_location_error_is_not_end_of_stream() {
    let mut stub = PositionStub::new(PositionServer::new(PositionServiceImpl {
        fail_pull_after: Some(1),
        ..Default::default()
    }));

    let mut download = stub.pull_location().await.unwrap();

    assert!(download.recv().await.unwrap().is_some());

    let status = download.recv().await.unwrap_err();
    assert_eq!(status.code(), tonic::Code::Unavailable);
}
