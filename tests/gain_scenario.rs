use gain_plugin::audio::{BusesLayout, ChannelSet, GainProcessor, ProcessorConfig};

fn stereo_block() -> ([f32; 4], [f32; 4]) {
    ([1.0; 4], [2.0; 4])
}

#[test]
fn default_gain_then_half_gain() {
    let processor = GainProcessor::new(ProcessorConfig::EFFECT);

    let (mut left, mut right) = stereo_block();
    processor.process(&mut [&mut left[..], &mut right[..]]);
    assert_eq!(left, [1.0; 4]);
    assert_eq!(right, [2.0; 4]);

    processor.gain_parameter().set_value_notifying_host(0.5);

    let (mut left, mut right) = stereo_block();
    processor.process(&mut [&mut left[..], &mut right[..]]);
    assert_eq!(left, [0.5; 4]);
    assert_eq!(right, [1.0; 4]);
}

#[test]
fn restored_state_drives_processing_and_editor() {
    let source = GainProcessor::new(ProcessorConfig::EFFECT);
    source.gain_parameter().set_value_notifying_host(1.5);
    let blob = source.get_state();

    let target = GainProcessor::new(ProcessorConfig::EFFECT);
    let editor = target.create_editor();
    editor.mark_painted();

    target.set_state(&blob).unwrap();
    assert!(editor.needs_repaint());
    assert_eq!(editor.value_text(), "1.50");

    let mut mono = [2.0f32; 3];
    target.process_with_inputs(&mut [&mut mono[..]], 1);
    assert_eq!(mono, [3.0; 3]);
}

#[test]
fn editor_gesture_reaches_audio_path() {
    let processor = GainProcessor::new(ProcessorConfig::EFFECT);
    let mut editor = processor.create_editor();

    editor.slider_value_changed(0.25);

    let (mut left, mut right) = stereo_block();
    processor.process(&mut [&mut left[..], &mut right[..]]);
    assert_eq!(left, [0.25; 4]);
    assert_eq!(right, [0.5; 4]);
}

#[test]
fn editor_outliving_processor_stays_valid() {
    let processor = GainProcessor::new(ProcessorConfig::EFFECT);
    let gain = processor.gain_parameter().clone();
    let editor = processor.create_editor();
    drop(processor);

    gain.set_value_notifying_host(0.75);
    assert_eq!(editor.value_text(), "0.75");
}

#[test]
fn host_negotiates_mono() {
    let mut processor = GainProcessor::new(ProcessorConfig::EFFECT);
    assert!(!processor.set_buses_layout(BusesLayout::new(ChannelSet::Stereo, ChannelSet::Mono)));
    assert!(processor.set_buses_layout(BusesLayout::MONO));
    processor.prepare(44_100.0, 64);

    let mut mono = [4.0f32; 2];
    let mut spare = [9.0f32; 2];
    processor.gain_parameter().set_value_notifying_host(0.5);
    processor.process(&mut [&mut mono[..], &mut spare[..]]);

    assert_eq!(mono, [2.0; 2]);
    assert_eq!(spare, [0.0; 2]);
}
