//! # Concurrency Properties
//!
//! Many independent client tasks against one single-worker dispatch
//! service: every response lands at the peer that asked for it, and the
//! registry survives register/deregister churn from many tasks.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::watch;
    use tokio::time::timeout;

    use futures::future::join_all;
    use relay_bus::{EndpointRegistry, InProcessChannel};
    use relay_client::ClientDriver;
    use relay_service::{DispatchService, IncrementResponder};
    use relay_types::{Frame, RelayError};

    #[tokio::test]
    async fn test_n_concurrent_clients_each_get_their_own_response() {
        let registry = Arc::new(EndpointRegistry::new());
        let (stop, stop_rx) = watch::channel(false);
        let service =
            DispatchService::new(registry.clone(), Arc::new(IncrementResponder), stop_rx)
                .unwrap();
        let service_id = service.service_id();
        let service_task = tokio::spawn(service.run());
        let channel = Arc::new(InProcessChannel::new(registry.clone()));

        const CLIENTS: i64 = 32;
        let tasks: Vec<_> = (0..CLIENTS)
            .map(|i| {
                let driver = ClientDriver::new(channel.clone(), service_id)
                    .with_timeout(Duration::from_secs(5));
                tokio::spawn(async move {
                    let response = driver.request(i.to_string().into_bytes()).await?;
                    Ok::<(i64, Vec<u8>), RelayError>((i, response))
                })
            })
            .collect();

        for result in join_all(tasks).await {
            let (i, response) = result.expect("client task must not panic").unwrap();
            // Correlation: each client sees exactly its own increment.
            assert_eq!(response, (i + 1).to_string().into_bytes());
        }

        // Every one-shot identity was released.
        assert_eq!(registry.peer_count(), 1);

        stop.send(true).unwrap();
        service_task.await.unwrap();
    }

    #[tokio::test]
    async fn test_registry_survives_register_deregister_churn() {
        let registry = Arc::new(EndpointRegistry::new());

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let registry = registry.clone();
                tokio::spawn(async move {
                    for _ in 0..50 {
                        let peer = registry.register().unwrap();
                        let frame = Frame::new(peer, 0, b"ping".to_vec()).unwrap();
                        registry.send(peer, frame).unwrap();
                        let got = registry.receive(peer).await.unwrap();
                        assert_eq!(got.payload(), b"ping");
                        registry.deregister(peer);
                    }
                })
            })
            .collect();

        for result in join_all(tasks).await {
            result.expect("churn task must not panic");
        }
        assert_eq!(registry.peer_count(), 0);
    }

    #[tokio::test]
    async fn test_slow_peer_does_not_block_others() {
        let registry = Arc::new(EndpointRegistry::new());
        let slow = registry.register().unwrap();
        let fast = registry.register().unwrap();

        // The slow peer's receive is parked with an empty queue.
        let parked = {
            let registry = registry.clone();
            tokio::spawn(async move { registry.receive(slow).await })
        };
        tokio::task::yield_now().await;

        // Delivery to the fast peer proceeds regardless.
        let frame = Frame::new(slow, 0, b"now".to_vec()).unwrap();
        registry.send(fast, frame).unwrap();
        let got = timeout(Duration::from_millis(500), registry.receive(fast))
            .await
            .expect("unrelated peer must not be blocked")
            .unwrap();
        assert_eq!(got.payload(), b"now");

        // Unpark the slow peer by delivering its frame.
        let frame = Frame::new(fast, 0, b"late".to_vec()).unwrap();
        registry.send(slow, frame).unwrap();
        let got = parked.await.unwrap().unwrap();
        assert_eq!(got.payload(), b"late");
    }

    #[tokio::test]
    async fn test_concurrent_sessions_on_one_service() {
        let registry = Arc::new(EndpointRegistry::new());
        let (stop, stop_rx) = watch::channel(false);
        let service =
            DispatchService::new(registry.clone(), Arc::new(IncrementResponder), stop_rx)
                .unwrap();
        let service_id = service.service_id();
        let service_task = tokio::spawn(service.run());
        let channel = Arc::new(InProcessChannel::new(registry.clone()));

        let tasks: Vec<_> = (0..8i64)
            .map(|i| {
                let driver = ClientDriver::new(channel.clone(), service_id)
                    .with_timeout(Duration::from_secs(5));
                tokio::spawn(async move {
                    let mut session = driver.open_session().await.unwrap();
                    for round in 0..10i64 {
                        let value = i * 1000 + round;
                        let response =
                            session.request(value.to_string().into_bytes()).await.unwrap();
                        assert_eq!(response, (value + 1).to_string().into_bytes());
                    }
                    session.close().await;
                })
            })
            .collect();

        for result in join_all(tasks).await {
            result.expect("session task must not panic");
        }
        assert_eq!(registry.peer_count(), 1);

        stop.send(true).unwrap();
        service_task.await.unwrap();
    }
}
