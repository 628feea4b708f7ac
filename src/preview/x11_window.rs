// src/preview/x11_window.rs
#![allow(non_upper_case_globals)]

//! Minimal X11 preview window.
//!
//! Opens one window per `show` call, paints the image via XPutImage on every
//! Expose, and blocks until the window manager asks the window to close
//! (WM_DELETE_WINDOW) or the user presses `q` or Escape.

use crate::preview::viewer::Viewer;
use anyhow::{anyhow, Context, Result};
use image::DynamicImage;
use libc::{c_char, c_int, c_uint};
use log::{debug, info, trace, warn};
use std::ffi::CString;
use std::ptr;
use x11::keysym::{XK_Escape, XK_q};
use x11::xlib::*;

const BYTES_PER_PIXEL: usize = 4;

pub struct X11Viewer {
    display: *mut Display,
    screen: c_int,
}

impl X11Viewer {
    /// Connects to the X server named by `DISPLAY`.
    pub fn new() -> Result<Self> {
        info!("X11Viewer::new() - Opening X11 display");

        let display = unsafe { XOpenDisplay(ptr::null()) };
        if display.is_null() {
            return Err(anyhow!("Failed to open X11 display. Is DISPLAY set?"));
        }
        let screen = unsafe { XDefaultScreen(display) };
        debug!("X11Viewer: display {:p}, screen {}", display, screen);

        Ok(Self { display, screen })
    }
}

impl Viewer for X11Viewer {
    fn show(&mut self, title: &str, image: &DynamicImage) -> Result<()> {
        let (width, height) = (image.width(), image.height());
        let depth = unsafe { XDefaultDepth(self.display, self.screen) };
        if depth != 24 && depth != 32 {
            return Err(anyhow!(
                "Unsupported X11 visual depth {} (need TrueColor 24 or 32)",
                depth
            ));
        }

        let byte_order = unsafe { XImageByteOrder(self.display) };
        trace!("X11Viewer: image byte order {}", byte_order);

        // XImage borrows this buffer; it must outlive the window below.
        let mut framebuffer = to_zpixmap(image, byte_order == MSBFirst);
        let c_title = CString::new(title).context("Window title contains a NUL byte")?;

        unsafe {
            let root = XRootWindow(self.display, self.screen);
            let visual = XDefaultVisual(self.display, self.screen);

            let window = XCreateSimpleWindow(
                self.display,
                root,
                0,
                0,
                width,
                height,
                0,
                XBlackPixel(self.display, self.screen),
                XBlackPixel(self.display, self.screen),
            );
            if window == 0 {
                return Err(anyhow!("Failed to create X11 window"));
            }

            XStoreName(self.display, window, c_title.as_ptr());
            XSelectInput(
                self.display,
                window,
                ExposureMask | KeyPressMask | StructureNotifyMask,
            );

            // Set WM_DELETE_WINDOW protocol so the close button reaches us
            let mut wm_delete_window = XInternAtom(
                self.display,
                b"WM_DELETE_WINDOW\0".as_ptr() as *const c_char,
                False,
            );
            XSetWMProtocols(self.display, window, &mut wm_delete_window, 1);

            let gc = XCreateGC(self.display, window, 0, ptr::null_mut());

            let ximage = XCreateImage(
                self.display,
                visual,
                depth as c_uint,
                ZPixmap,
                0,
                framebuffer.as_mut_ptr() as *mut c_char,
                width,
                height,
                32, // bitmap_pad
                (width as usize * BYTES_PER_PIXEL) as c_int,
            );
            if ximage.is_null() {
                XFreeGC(self.display, gc);
                XDestroyWindow(self.display, window);
                return Err(anyhow!("Failed to create XImage"));
            }

            XMapWindow(self.display, window);
            XFlush(self.display);
            info!(
                "X11Viewer: showing '{}' ({}x{}); close the window or press q to continue",
                title, width, height
            );

            loop {
                let mut event: XEvent = std::mem::zeroed();
                XNextEvent(self.display, &mut event);

                match event.get_type() {
                    Expose => {
                        trace!("X11Viewer: Expose");
                        XPutImage(
                            self.display,
                            window,
                            gc,
                            ximage,
                            0,
                            0,
                            0,
                            0,
                            width,
                            height,
                        );
                        XFlush(self.display);
                    }
                    KeyPress => {
                        let keysym = XLookupKeysym(&mut event.key, 0);
                        if keysym == KeySym::from(XK_Escape) || keysym == KeySym::from(XK_q) {
                            debug!("X11Viewer: dismissed from keyboard");
                            break;
                        }
                    }
                    ClientMessage => {
                        if event.client_message.data.get_long(0) as Atom == wm_delete_window {
                            debug!("X11Viewer: WM_DELETE_WINDOW");
                            break;
                        }
                    }
                    _ => {}
                }
            }

            // Clean up (don't free data, framebuffer still owns it)
            (*ximage).data = ptr::null_mut();
            XDestroyImage(ximage);
            XFreeGC(self.display, gc);
            XDestroyWindow(self.display, window);
            XFlush(self.display);
        }

        drop(framebuffer);
        Ok(())
    }
}

impl Drop for X11Viewer {
    fn drop(&mut self) {
        info!("X11Viewer::drop() - Closing display");
        unsafe {
            if !self.display.is_null() {
                let status = XCloseDisplay(self.display);
                if status != 0 {
                    warn!("XCloseDisplay returned non-zero status: {}", status);
                }
            }
        }
    }
}

/// Converts to the 32-bit ZPixmap layout of a TrueColor visual, compositing
/// any alpha over black. XCreateImage takes the server's byte order, so an
/// MSBFirst server gets (pad, R, G, B) and an LSBFirst one (B, G, R, pad).
fn to_zpixmap(image: &DynamicImage, msb_first: bool) -> Vec<u8> {
    let rgba = image.to_rgba8();
    let mut out = Vec::with_capacity(rgba.as_raw().len());
    for px in rgba.pixels() {
        let [r, g, b, a] = px.0;
        let over_black = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
        let (r, g, b) = (over_black(r), over_black(g), over_black(b));
        if msb_first {
            out.extend_from_slice(&[0, r, g, b]);
        } else {
            out.extend_from_slice(&[b, g, r, 0]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use test_log::test;

    fn two_pixels() -> DynamicImage {
        DynamicImage::ImageRgba8(
            RgbaImage::from_vec(2, 1, vec![10, 20, 30, 255, 200, 100, 50, 0]).unwrap(),
        )
    }

    #[test]
    fn lsb_first_layout_composites_alpha() {
        assert_eq!(
            to_zpixmap(&two_pixels(), false),
            vec![30, 20, 10, 0, 0, 0, 0, 0]
        );

        let half = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 128])));
        assert_eq!(to_zpixmap(&half, false), vec![0, 0, 128, 0]);
    }

    #[test]
    fn msb_first_layout_puts_padding_first() {
        assert_eq!(
            to_zpixmap(&two_pixels(), true),
            vec![0, 10, 20, 30, 0, 0, 0, 0]
        );

        let half = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([0, 255, 0, 128])));
        assert_eq!(to_zpixmap(&half, true), vec![0, 0, 128, 0]);
    }
}
