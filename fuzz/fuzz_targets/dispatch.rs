#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use registry::{Descriptor, Sensor, SensorRegistry};
use server::{dispatch, sensor_models, BufferedTransport, MessageContext, Model};
use wire::Limits;

fuzz_target!(|data: &[u8]| {
    let registry = SensorRegistry::builder()
        .sensor(Sensor::new(0x0056, Descriptor::new(10, 10, 1, 5, 2)))
        .sensor(Sensor::new(0x004E, Descriptor::new(0x0FFF, 0x0FFF, 0xFF, 0xFF, 0xFF)))
        .build();
    let Ok(registry) = registry else {
        return;
    };
    let (srv, setup) = sensor_models(Arc::new(registry));
    let limits = Limits::default();
    let ctx = MessageContext::new(0, 0, 0x0001);

    for model in [&srv as &dyn Model, &setup] {
        let mut transport = BufferedTransport::new(limits.clone());
        let _ = dispatch(model, &ctx, data, &limits, &mut transport);
        for sent in transport.sent() {
            assert!(sent.message.has_mic_room());
            assert!(sent.message.len() <= limits.max_message_bytes);
        }
    }
});
