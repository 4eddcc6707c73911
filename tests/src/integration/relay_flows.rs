//! # Relay Flows
//!
//! Participants talking to one relay server over real HTTP:
//!
//! 1. **send → receive**: messages come back in order with the new sequence number
//! 2. **Long-poll**: waiting receivers wake on a send, or time out empty
//! 3. **BroadcastChannel**: byte payloads survive base64 transport and the
//!    receive loop delivers only what was sent after it started

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use async_trait::async_trait;
    use serde_json::{json, Value};
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    use channel_relay::{
        BroadcastChannel, ChannelRegistry, ClientConfig, MessageHandler, RelayClient, RelayConfig,
        RelayServer, RunningRelay,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    async fn start_relay(receive_timeout: Duration) -> RunningRelay {
        let mut config = RelayConfig::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0);
        config.receive_timeout = receive_timeout;
        RelayServer::new(config, Arc::new(ChannelRegistry::new()))
            .unwrap()
            .bind()
            .await
            .unwrap()
    }

    fn url_of(relay: &RunningRelay) -> String {
        format!("http://{}", relay.local_addr())
    }

    fn client_for(relay: &RunningRelay) -> Arc<RelayClient> {
        Arc::new(RelayClient::new(ClientConfig::new(url_of(relay))).unwrap())
    }

    struct Collect(mpsc::UnboundedSender<Vec<u8>>);

    #[async_trait]
    impl MessageHandler for Collect {
        async fn handle_message(&self, message: Vec<u8>) {
            let _ = self.0.send(message);
        }
    }

    // =============================================================================
    // RPC FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_send_then_receive_in_order() {
        let relay = start_relay(Duration::from_millis(200)).await;
        let client = client_for(&relay);

        for i in 0..3 {
            client.send("game", &json!({"move": i})).await.unwrap();
        }

        assert_eq!(client.get_seq("game").await.unwrap(), 3);

        let all = client.receive("game", 0).await.unwrap();
        assert_eq!(all.seq, 3);
        assert_eq!(
            all.messages,
            vec![json!({"move": 0}), json!({"move": 1}), json!({"move": 2})]
        );

        let tail = client.receive("game", 2).await.unwrap();
        assert_eq!(tail.messages, vec![json!({"move": 2})]);

        relay.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_channels_are_independent() {
        let relay = start_relay(Duration::from_millis(100)).await;
        let client = client_for(&relay);

        client.send("a", &json!("only in a")).await.unwrap();

        assert_eq!(client.get_seq("a").await.unwrap(), 1);
        assert_eq!(client.get_seq("b").await.unwrap(), 0);

        let res = client.receive("b", 0).await.unwrap();
        assert!(res.is_empty());
        assert_eq!(res.seq, 0);

        relay.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_named_params_over_http() {
        let relay = start_relay(Duration::from_millis(100)).await;
        let http = reqwest::Client::new();

        let send = json!({
            "jsonrpc": "2.0",
            "method": "send",
            "params": {"channel": "named", "message": [1, 2, 3]},
            "id": 1
        });
        let body: Value = http
            .post(url_of(&relay))
            .json(&send)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["result"], Value::Null);
        assert!(body.get("error").is_none());

        let receive = json!({
            "jsonrpc": "2.0",
            "method": "receive",
            "params": {"channel": "named", "fromseq": 0},
            "id": 2
        });
        let body: Value = http
            .post(url_of(&relay))
            .json(&receive)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["id"], 2);
        assert_eq!(body["result"], json!({"messages": [[1, 2, 3]], "seq": 1}));

        relay.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_long_poll_times_out_empty() {
        let relay = start_relay(Duration::from_millis(300)).await;
        let client = client_for(&relay);

        let started = Instant::now();
        let res = client.receive("idle", 0).await.unwrap();

        assert!(res.is_empty());
        assert_eq!(res.seq, 0);
        assert!(started.elapsed() >= Duration::from_millis(250));

        relay.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_send_wakes_all_waiting_receivers() {
        let relay = start_relay(Duration::from_secs(3)).await;

        let mut waiters = Vec::new();
        for _ in 0..2 {
            let client = client_for(&relay);
            waiters.push(tokio::spawn(async move {
                client.receive("table", 0).await
            }));
        }

        // Let both receivers block first
        tokio::time::sleep(Duration::from_millis(100)).await;
        client_for(&relay)
            .send("table", &json!("deal"))
            .await
            .unwrap();

        for waiter in waiters {
            let res = timeout(Duration::from_secs(2), waiter)
                .await
                .expect("receiver not woken")
                .unwrap()
                .unwrap();
            assert_eq!(res.messages, vec![json!("deal")]);
            assert_eq!(res.seq, 1);
        }

        relay.shutdown().await.unwrap();
    }

    // =============================================================================
    // BROADCAST CHANNEL FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_binary_payload_roundtrip() {
        let relay = start_relay(Duration::from_millis(200)).await;
        let channel = BroadcastChannel::new(client_for(&relay), "bytes");

        let payload = vec![0u8, 255, 10, 13, 34, 92];
        channel.send_message(&payload).await.unwrap();

        assert_eq!(channel.get_messages().await.unwrap(), vec![payload]);
        assert_eq!(channel.seq(), 1);

        // Nothing new: times out empty and keeps the sequence number
        assert!(channel.get_messages().await.unwrap().is_empty());
        assert_eq!(channel.seq(), 1);

        relay.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_entries_are_skipped() {
        let relay = start_relay(Duration::from_millis(200)).await;
        let client = client_for(&relay);
        let channel = BroadcastChannel::new(Arc::clone(&client), "mixed");

        client.send("mixed", &json!("not base64!")).await.unwrap();
        client.send("mixed", &json!(42)).await.unwrap();
        channel.send_message(b"valid").await.unwrap();

        assert_eq!(channel.get_messages().await.unwrap(), vec![b"valid".to_vec()]);
        assert_eq!(channel.seq(), 3);

        relay.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_receive_loop_delivers_new_messages_only() {
        let relay = start_relay(Duration::from_millis(200)).await;
        let client = client_for(&relay);

        let sender = BroadcastChannel::new(Arc::clone(&client), "loop");
        sender.send_message(b"before start").await.unwrap();

        let receiver = BroadcastChannel::new(Arc::clone(&client), "loop");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let running = receiver.start(Arc::new(Collect(tx))).await.unwrap();
        assert_eq!(receiver.seq(), 1);

        sender.send_message(b"first").await.unwrap();
        sender.send_message(b"second").await.unwrap();

        let mut got = Vec::new();
        while got.len() < 2 {
            let msg = timeout(Duration::from_secs(2), rx.recv())
                .await
                .expect("message not delivered")
                .unwrap();
            got.push(msg);
        }
        assert_eq!(got, vec![b"first".to_vec(), b"second".to_vec()]);

        running.stop().await;
        relay.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_receive_loop_stops_while_polling() {
        let relay = start_relay(Duration::from_secs(3)).await;
        let channel = BroadcastChannel::new(client_for(&relay), "quiet");

        let (tx, _rx) = mpsc::unbounded_channel();
        let running = channel.start(Arc::new(Collect(tx))).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        // Stop does not wait out the long-poll
        timeout(Duration::from_secs(1), running.stop())
            .await
            .expect("stop blocked on receive");

        relay.shutdown().await.unwrap();
    }
}
