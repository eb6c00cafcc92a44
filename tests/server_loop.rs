use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::ops::ControlFlow;
use std::thread;

use plainws::server::Server;
use plainws::connection::{connect, Message};

use log::debug;

#[test]
fn server_loop() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut server = Server::bind("ws://127.0.0.1:0").unwrap();
    let addr = server.local_addr().unwrap();

    let t1 = thread::spawn(move || {
        let mut served = 0;
        server
            .server_loop(|conn| {
                served += 1;
                debug!("server: serve[{}] {}", served, conn.path());
                if let Some(Message::Text(s)) = conn.recv().unwrap() {
                    conn.send_text(&s.to_uppercase()).unwrap();
                }
                if served == 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();
        served
    });

    let t2 = thread::spawn(move || {
        // not a websocket request, rejected and skipped
        let mut tcp = TcpStream::connect(addr).unwrap();
        tcp.write_all(b"GET / HTTP/1.1\r\nhost: localhost\r\n\r\n").unwrap();
        let mut status = String::new();
        BufReader::new(tcp).read_line(&mut status).unwrap();
        debug!("client: {}", status.trim_end());
        assert!(status.starts_with("HTTP/1.1 400"));

        for i in 1..=3 {
            let mut conn = connect(format!("ws://{}/{}", addr, i)).unwrap();
            conn.send_text("hello").unwrap();
            assert_eq!(conn.recv().unwrap(), Some(Message::Text("HELLO".into())));
            // closed by the server once the handler returns
            assert_eq!(conn.recv().unwrap(), None);
        }
    });

    t2.join().unwrap();
    assert_eq!(t1.join().unwrap(), 3);
}
