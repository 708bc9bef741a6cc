pub mod dense_layer;
