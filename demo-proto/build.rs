use std::io::Result;

fn main() -> Result<()> {
    // List of proto files containing a service or message definition
    let proto_files = &[
        "proto/common.proto",
        "proto/hello.proto",
        "proto/demo.proto",
        "proto/sample.proto",
    ];

    // Name of the folder containing the proto definitions
    let proto_folder = "proto";

    for file in proto_files {
        println!("cargo:rerun-if-changed={file}");
    }

    // Servers are only consumed by the integration tests of `demo-core`.
    tonic_prost_build::configure()
        .build_client(true)
        .build_server(true)
        .compile_protos(proto_files, &[proto_folder])
}
