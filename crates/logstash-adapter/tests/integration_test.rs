// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use logstash_adapter::event::Container;
use logstash_adapter::{AdapterRegistry, EnrichedRecord, LogEvent, Route};
use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};

fn container() -> Container {
    Container {
        name: "/checkout".to_string(),
        id: "4f1c2a".to_string(),
        image: "shop/checkout:2.3".to_string(),
        hostname: "checkout-7".to_string(),
        ip_address: "172.17.0.5".to_string(),
        env: vec![
            "LOGSTASH-TYPE=Checkout".to_string(),
            "LOGSTASH-TAGS=Shop".to_string(),
            "LOGSTASH-APPENV=Staging".to_string(),
            "LOGSTASH-TAGS=Shop,Payments".to_string(),
        ],
        labels: HashMap::from([
            ("io.rancher.container.ip".to_string(), "10.42.3.4/16".to_string()),
            (
                "io.rancher.service.requested.host.id".to_string(),
                "1h3".to_string(),
            ),
        ]),
    }
}

#[tokio::test]
async fn udp_adapter_ships_one_datagram_per_event() {
    let collector = UdpSocket::bind("127.0.0.1:0")
        .await
        .expect("unable to bind UDP socket");
    let route = Route::parse(&format!(
        "logstash://{}",
        collector.local_addr().expect("no local addr")
    ))
    .expect("invalid route");

    let adapter = AdapterRegistry::with_logstash()
        .build(route)
        .await
        .expect("failed to build adapter");

    let (tx, rx) = mpsc::channel(8);
    let stream = tokio::spawn(adapter.stream(rx));
    for line in ["first", "second", "third"] {
        tx.send(LogEvent::new(line, container()))
            .await
            .expect("queue closed");
    }
    drop(tx);

    let mut buf = [0u8; 2048];
    let mut received = Vec::new();
    for _ in 0..3 {
        let n = timeout(Duration::from_secs(1), collector.recv(&mut buf))
            .await
            .expect("timed out waiting for datagram")
            .expect("recv failed");
        assert_ne!(buf[n - 1], b'\n');
        let record: EnrichedRecord = serde_json::from_slice(&buf[..n]).expect("invalid record");
        received.push(record);
    }

    let stats = stream
        .await
        .expect("stream task panicked")
        .expect("best-effort stream never fails");
    assert_eq!(stats.sent, 3);

    let messages: Vec<&str> = received.iter().map(|r| r.message.as_str()).collect();
    assert_eq!(messages, vec!["first", "second", "third"]);

    let record = &received[0];
    assert_eq!(record.name, "/checkout");
    assert_eq!(record.log_type, "checkout");
    assert_eq!(record.tags, "shop,payments");
    assert_eq!(record.rancher_ip, "10.42.3.4/16");
    assert_eq!(record.rancher_host_id, "1h3");
    assert_eq!(record.docker_ip, "172.17.0.5");
    assert_eq!(record.app_env, None);
}

#[tokio::test]
async fn tcp_adapter_ships_newline_delimited_records() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("unable to bind TCP listener");
    let route = Route::parse(&format!(
        "logstash-tcp://{}",
        listener.local_addr().expect("no local addr")
    ))
    .expect("invalid route");

    let adapter = AdapterRegistry::with_logstash()
        .build(route)
        .await
        .expect("failed to build adapter");
    let (mut peer, _) = listener.accept().await.expect("accept failed");

    let (tx, rx) = mpsc::channel(8);
    for line in ["alpha", "beta"] {
        tx.send(LogEvent::new(line, container()))
            .await
            .expect("queue closed");
    }
    drop(tx);

    let stats = adapter.stream(rx).await.expect("stream failed");
    assert_eq!(stats.sent, 2);

    let mut received = String::new();
    timeout(Duration::from_secs(1), peer.read_to_string(&mut received))
        .await
        .expect("timed out reading stream")
        .expect("read failed");

    assert!(received.ends_with('\n'));
    let records: Vec<EnrichedRecord> = received
        .lines()
        .map(|line| serde_json::from_str(line).expect("invalid record"))
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].message, "alpha");
    assert_eq!(records[1].message, "beta");
    assert_eq!(records[0].app_env.as_deref(), Some("staging"));
}

#[tokio::test]
async fn udp_adapter_over_tcp_transport_override() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("unable to bind TCP listener");
    let route = Route::parse(&format!(
        "logstash+tcp://{}",
        listener.local_addr().expect("no local addr")
    ))
    .expect("invalid route");

    let adapter = AdapterRegistry::with_logstash()
        .build(route)
        .await
        .expect("failed to build adapter");
    let (mut peer, _) = listener.accept().await.expect("accept failed");

    let (tx, rx) = mpsc::channel(1);
    tx.send(LogEvent::new("only", container()))
        .await
        .expect("queue closed");
    drop(tx);
    adapter.stream(rx).await.expect("stream failed");

    let mut received = String::new();
    peer.read_to_string(&mut received).await.expect("read failed");
    let record: EnrichedRecord = serde_json::from_str(&received).expect("invalid record");
    assert_eq!(record.message, "only");
    assert!(!received.ends_with('\n'));
}
